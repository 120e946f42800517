//! Transitive-closure reasoning over the knowledge store.
//!
//! Two traversals live here. Subtype reachability walks `EVERY … IS_A …`
//! rule edges with a deduplicating worklist, so it terminates on any input
//! including cyclic rule sets (a cycle simply stops expanding once all its
//! members are enqueued). Ownership expansion walks `EVERY … HAS …` edges
//! multiplying counts along the way — a bill-of-materials expansion — and
//! there a cycle is a modeling error that gets reported instead of followed.

use std::collections::BTreeMap;

use crate::atom::{Quantity, QuantityType, TypeName};
use crate::error::ReasonerError;
use crate::response::Response;
use crate::sentence::IsIdentifierAType;
use crate::store::KnowledgeStore;

/// The full set of types reachable from `seeds` by following
/// `EVERY <type> IS_A <target>` rule edges, in discovery order (seeds
/// first).
///
/// The worklist is deduplicated on enqueue — a type is never revisited — so
/// the traversal is bounded by the number of distinct known types.
#[must_use]
pub fn reachable(
    store: &KnowledgeStore,
    seeds: impl IntoIterator<Item = TypeName>,
) -> Vec<TypeName> {
    let mut worklist: Vec<TypeName> = Vec::new();
    for seed in seeds {
        if !worklist.contains(&seed) {
            worklist.push(seed);
        }
    }

    let mut index = 0;
    while index < worklist.len() {
        let current = worklist[index].clone();
        if let Some(targets) = store.every_is_targets(&current) {
            for target in targets {
                if !worklist.contains(&target) {
                    worklist.push(target);
                }
            }
        }
        index += 1;
    }
    worklist
}

/// Resolves a membership query against the store.
///
/// The resolution order matters:
///
/// 1. An identifier unknown to both instance stores is
///    [`Response::UnknownIdentifier`].
/// 2. A goal type mentioned nowhere in the store is
///    [`Response::UnknownType`].
/// 3. An identifier with no direct types is [`Response::NeedMoreInfo`].
/// 4. Otherwise walk the closure of the direct types. At each visited type
///    the goal match is checked *before* negative rules, so a type that is
///    both reachable and superficially subject to an unrelated negative rule
///    still resolves [`Response::Correct`].
/// 5. If the goal was never reached but some visited type carries a
///    `NOT A SINGLE` rule against it (in either orientation), the answer is
///    [`Response::Incorrect`].
/// 6. Anything else is [`Response::NeedMoreInfo`].
#[must_use]
pub fn resolve(store: &KnowledgeStore, question: &IsIdentifierAType) -> Response {
    let identifier = &question.identifier;
    let goal = &question.type_name;

    if !store.knows_identifier(identifier) {
        return Response::UnknownIdentifier;
    }
    if !store.mentions_type(goal) {
        return Response::UnknownType;
    }
    let Some(direct) = store.is_facts_of(identifier) else {
        return Response::NeedMoreInfo;
    };

    let mut contradicted = false;
    for visited in reachable(store, direct) {
        if &visited == goal {
            return Response::Correct;
        }
        if store.negates(&visited, goal) || store.negates(goal, &visited) {
            contradicted = true;
        }
    }

    if contradicted {
        Response::Incorrect
    } else {
        Response::NeedMoreInfo
    }
}

/// Everything transitively owned through `EVERY … HAS …` rules, starting
/// from one counted type.
///
/// Counts multiply along each chain (`1 CAR` × `EVERY CAR HAS 4 WHEEL` ×
/// `EVERY WHEEL HAS 1 TIRE` yields `4 TIRE`) and sum when the same target
/// type is produced via more than one path.
///
/// # Errors
///
/// Returns [`ReasonerError::CyclicHasRules`] when expansion would re-enter a
/// type already on the current chain, and
/// [`ReasonerError::QuantityOverflow`] when a multiplied or summed count
/// exceeds the representable range.
pub fn owned_quantities(
    store: &KnowledgeStore,
    origin: &QuantityType,
) -> Result<BTreeMap<TypeName, u64>, ReasonerError> {
    let mut totals = BTreeMap::new();
    let mut path = vec![origin.type_name.clone()];
    expand(store, origin, &mut path, &mut totals)?;
    Ok(totals)
}

fn expand(
    store: &KnowledgeStore,
    current: &QuantityType,
    path: &mut Vec<TypeName>,
    totals: &mut BTreeMap<TypeName, u64>,
) -> Result<(), ReasonerError> {
    let Some(owned) = store.every_has_targets(&current.type_name) else {
        return Ok(());
    };

    for target in owned {
        let scaled = current
            .quantity
            .count()
            .checked_mul(target.quantity.count())
            .ok_or_else(|| ReasonerError::QuantityOverflow {
                type_name: target.type_name.clone(),
            })?;

        let total = totals.entry(target.type_name.clone()).or_insert(0);
        *total = total
            .checked_add(scaled)
            .ok_or_else(|| ReasonerError::QuantityOverflow {
                type_name: target.type_name.clone(),
            })?;

        if path.contains(&target.type_name) {
            return Err(ReasonerError::CyclicHasRules {
                type_name: target.type_name.clone(),
            });
        }
        path.push(target.type_name.clone());
        expand(
            store,
            &QuantityType::new(Quantity::new(scaled), target.type_name.clone()),
            path,
            totals,
        )?;
        path.pop();
    }
    Ok(())
}
