//! The knowledge store: an insert-reporting multimap and the four mappings
//! built on it.
//!
//! Values are sets — unordered, duplicate-free — and insertion is monotonic:
//! facts and rules are only ever added, never retracted, for the lifetime of
//! the store. `get` hands back an owned snapshot so a caller mutating its
//! copy can never corrupt the store.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::atom::{Frequency, FrequencyType, Identifier, Quantity, QuantityType, TypeName};
use crate::error::ReasonerError;
use crate::reasoner;
use crate::sentence::{
    FrequencyTypeHasQuantityType, FrequencyTypeIsType, IdentifierHasQuantityType,
    IdentifierIsAType,
};

/// What a [`MultiMap::put`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PutOutcome<V> {
    /// The value was not yet associated with the key and has been added.
    NewMappingCreated,
    /// The exact key/value pair already existed; the put was a no-op.
    RequestedMappingAlreadyExists,
    /// A previous value was displaced. Reserved for future single-valued
    /// slots; the set-valued stores used here never produce it.
    ReplacedOldMapping(V),
}

/// A key → set-of-values mapping that reports whether each insertion was new.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiMap<K: Ord, V: Ord> {
    map: BTreeMap<K, BTreeSet<V>>,
}

impl<K: Ord, V: Ord> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone, V: Ord + Clone> MultiMap<K, V> {
    /// Creates an empty multimap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Adds `value` to the set associated with `key`, reporting whether the
    /// mapping is new.
    pub fn put(&mut self, key: K, value: V) -> PutOutcome<V> {
        if self.map.entry(key).or_default().insert(value) {
            PutOutcome::NewMappingCreated
        } else {
            PutOutcome::RequestedMappingAlreadyExists
        }
    }

    /// An owned snapshot of the value set for `key`, or `None` if the key is
    /// unknown. An absent key and an empty set are different conditions; use
    /// [`contains_key`](Self::contains_key) to disambiguate when it matters.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<BTreeSet<V>> {
        self.map.get(key).cloned()
    }

    /// Whether `key` has ever been inserted.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Whether the exact `key`/`value` pair is present.
    #[must_use]
    pub fn contains_mapping(&self, key: &K, value: &V) -> bool {
        self.map.get(key).is_some_and(|set| set.contains(value))
    }

    /// Whether `value` appears under any key.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.map.values().any(|set| set.contains(value))
    }

    /// Iterates over the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    /// Iterates over `(key, value set)` entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &BTreeSet<V>)> {
        self.map.iter()
    }
}

/// Outcome of submitting a membership fact.
///
/// Distinct from [`PutOutcome`] because a membership fact can be redundant in
/// two ways: the exact edge already exists, or the type is already reachable
/// from the identifier through rule closure even though no direct edge
/// exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactOutcome {
    /// The fact was new and has been recorded.
    NewDirectMappingCreated,
    /// The exact fact was already recorded.
    DirectMappingAlreadyExists,
    /// The fact is already implied by rule closure.
    IndirectMappingAlreadyExists,
}

/// The four associative stores behind the knowledge base.
///
/// Direct instance facts and quantified rules for both relations:
///
/// - `is_facts`:  Identifier → {Type}
/// - `is_rules`:  FrequencyType → {Type}
/// - `has_facts`: Identifier → {QuantityType}
/// - `has_rules`: FrequencyType → {QuantityType}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeStore {
    is_facts: MultiMap<Identifier, TypeName>,
    is_rules: MultiMap<FrequencyType, TypeName>,
    has_facts: MultiMap<Identifier, QuantityType>,
    has_rules: MultiMap<FrequencyType, QuantityType>,
}

impl KnowledgeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a membership fact, rejecting both direct and closure-implied
    /// duplicates.
    pub fn put_is_fact(&mut self, fact: &IdentifierIsAType) -> FactOutcome {
        if self
            .is_facts
            .contains_mapping(&fact.identifier, &fact.type_name)
        {
            return FactOutcome::DirectMappingAlreadyExists;
        }

        let direct = self.is_facts.get(&fact.identifier).unwrap_or_default();
        if reasoner::reachable(self, direct).contains(&fact.type_name) {
            return FactOutcome::IndirectMappingAlreadyExists;
        }

        self.is_facts
            .put(fact.identifier.clone(), fact.type_name.clone());
        FactOutcome::NewDirectMappingCreated
    }

    /// Records an ownership fact, eagerly folding in everything the
    /// universal ownership rules imply for the owned type.
    ///
    /// Facts inherit `EVERY … HAS …` rules at the moment they are recorded,
    /// not lazily at query time, so `DAVID HAS 1 CAR` under
    /// `EVERY CAR HAS 4 WHEEL` also records `DAVID HAS 4 WHEEL`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReasonerError`] when the ownership rules are cyclic or
    /// the multiplied counts overflow. The store is left unchanged.
    pub fn put_has_fact(
        &mut self,
        fact: &IdentifierHasQuantityType,
    ) -> Result<PutOutcome<QuantityType>, ReasonerError> {
        let implied = reasoner::owned_quantities(self, &fact.quantity_type)?;

        let outcome = self
            .has_facts
            .put(fact.identifier.clone(), fact.quantity_type.clone());
        for (type_name, count) in implied {
            self.has_facts.put(
                fact.identifier.clone(),
                QuantityType::new(Quantity::new(count), type_name),
            );
        }
        Ok(outcome)
    }

    /// Records a membership rule, keyed by its full frequency/type subject.
    pub fn put_is_rule(&mut self, rule: &FrequencyTypeIsType) -> PutOutcome<TypeName> {
        self.is_rules
            .put(rule.frequency_type.clone(), rule.type_name.clone())
    }

    /// Records an ownership rule, keyed by its full frequency/type subject.
    pub fn put_has_rule(
        &mut self,
        rule: &FrequencyTypeHasQuantityType,
    ) -> PutOutcome<QuantityType> {
        self.has_rules
            .put(rule.frequency_type.clone(), rule.quantity_type.clone())
    }

    /// Snapshot of the direct types recorded for an identifier.
    #[must_use]
    pub fn is_facts_of(&self, identifier: &Identifier) -> Option<BTreeSet<TypeName>> {
        self.is_facts.get(identifier)
    }

    /// Snapshot of the quantities recorded for an identifier, including the
    /// rule-implied ones folded in at insertion.
    #[must_use]
    pub fn has_facts_of(&self, identifier: &Identifier) -> Option<BTreeSet<QuantityType>> {
        self.has_facts.get(identifier)
    }

    /// Targets of `EVERY <type> IS_A …` rules.
    #[must_use]
    pub fn every_is_targets(&self, type_name: &TypeName) -> Option<BTreeSet<TypeName>> {
        self.is_rules.get(&FrequencyType::every(type_name.clone()))
    }

    /// Targets of `EVERY <type> HAS …` rules.
    #[must_use]
    pub fn every_has_targets(&self, type_name: &TypeName) -> Option<BTreeSet<QuantityType>> {
        self.has_rules.get(&FrequencyType::every(type_name.clone()))
    }

    /// Whether a `NOT A SINGLE <subject> IS_A <target>` rule exists.
    #[must_use]
    pub fn negates(&self, subject: &TypeName, target: &TypeName) -> bool {
        self.is_rules
            .contains_mapping(&FrequencyType::not_a_single(subject.clone()), target)
    }

    /// Whether the identifier appears in either instance store.
    #[must_use]
    pub fn knows_identifier(&self, identifier: &Identifier) -> bool {
        self.is_facts.contains_key(identifier) || self.has_facts.contains_key(identifier)
    }

    /// Whether the type appears anywhere in the store: as an instance type,
    /// a rule subject, or a rule target, across both relations.
    #[must_use]
    pub fn mentions_type(&self, type_name: &TypeName) -> bool {
        self.is_facts.contains_value(type_name)
            || self.is_rules.keys().any(|key| &key.type_name == type_name)
            || self.is_rules.contains_value(type_name)
            || self
                .has_facts
                .iter()
                .any(|(_, set)| set.iter().any(|qt| &qt.type_name == type_name))
            || self.has_rules.keys().any(|key| &key.type_name == type_name)
            || self
                .has_rules
                .iter()
                .any(|(_, set)| set.iter().any(|qt| &qt.type_name == type_name))
    }

    /// All identifiers mentioned by any fact, in sorted order.
    #[must_use]
    pub fn known_identifiers(&self) -> Vec<Identifier> {
        let mut identifiers: Vec<Identifier> =
            self.is_facts.keys().chain(self.has_facts.keys()).cloned().collect();
        identifiers.sort();
        identifiers.dedup();
        identifiers
    }

    /// All types mentioned anywhere, in sorted order.
    #[must_use]
    pub fn known_types(&self) -> Vec<TypeName> {
        let mut types: BTreeSet<TypeName> = BTreeSet::new();
        for (_, set) in self.is_facts.iter() {
            types.extend(set.iter().cloned());
        }
        for (key, set) in self.is_rules.iter() {
            types.insert(key.type_name.clone());
            types.extend(set.iter().cloned());
        }
        for (_, set) in self.has_facts.iter() {
            types.extend(set.iter().map(|qt| qt.type_name.clone()));
        }
        for (key, set) in self.has_rules.iter() {
            types.insert(key.type_name.clone());
            types.extend(set.iter().map(|qt| qt.type_name.clone()));
        }
        types.into_iter().collect()
    }

    /// Whether a rule with the given frequency is stored for inspection.
    /// `NOT EVERY` rules land here parsed-but-inert: the reasoner never
    /// consults them.
    #[must_use]
    pub fn has_rule_with_frequency(&self, frequency: Frequency) -> bool {
        self.is_rules.keys().any(|key| key.frequency == frequency)
            || self.has_rules.keys().any(|key| key.frequency == frequency)
    }
}
