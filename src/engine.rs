//! The session: grammar plus knowledge store behind the three core
//! operations.
//!
//! A [`Session`] is single-threaded and synchronous: `parse`, `submit`, and
//! `query` all run to completion on the caller's thread with no suspension
//! points and no internal locking. Insertion is monotonic and queries only
//! read, so callers needing concurrency can serialize access externally with
//! one coarse lock around the whole session.

use std::collections::{BTreeMap, BTreeSet};

use crate::atom::{Frequency, Identifier, QuantityType, TypeName};
use crate::error::{GrammarError, ReasonerError};
use crate::grammar::Grammar;
use crate::reasoner;
use crate::response::Response;
use crate::sentence::{IsIdentifierAType, Sentence};
use crate::store::KnowledgeStore;

/// One knowledge-base session: a compiled grammar and the facts and rules
/// accumulated over its lifetime.
///
/// # Examples
///
/// ```
/// use credo::{Response, Session};
///
/// let mut session = Session::new().expect("grammar self-check");
///
/// let fact = session.parse("DAVID IS A PROGRAMMER").unwrap();
/// assert_eq!(session.submit(&fact).unwrap(), Response::NewDirectMappingCreated);
///
/// let rule = session.parse("EVERY PROGRAMMER IS A GENIUS").unwrap();
/// assert_eq!(session.submit(&rule).unwrap(), Response::Ok);
///
/// let question = session.parse("IS DAVID A GENIUS?").unwrap();
/// assert_eq!(session.submit(&question).unwrap(), Response::Correct);
/// ```
pub struct Session {
    grammar: Grammar,
    store: KnowledgeStore,
}

impl Session {
    /// Creates a session with an empty store.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] if the grammar fails its startup
    /// self-check. That is a programming defect; abort loudly.
    pub fn new() -> Result<Self, GrammarError> {
        Ok(Self {
            grammar: Grammar::new()?,
            store: KnowledgeStore::new(),
        })
    }

    /// Parses one normalized line. `None` means no grammar form matched.
    #[must_use]
    pub fn parse(&self, line: &str) -> Option<Sentence> {
        self.grammar.parse(line)
    }

    /// Submits a parsed sentence to the knowledge base.
    ///
    /// Facts and rules mutate the store and report how the insertion went.
    /// Bare atoms and the bare-relationship form are accepted by the grammar
    /// but not actionable, and a query sentence is delegated to
    /// [`query`](Self::query). `NOT EVERY` rules are recorded but their
    /// semantics are unresolved, so they come back
    /// [`Response::NotYetImplemented`] rather than [`Response::Ok`].
    ///
    /// # Errors
    ///
    /// Returns a [`ReasonerError`] when an ownership fact trips over cyclic
    /// `HAS` rules or a count overflow during rule folding.
    pub fn submit(&mut self, sentence: &Sentence) -> Result<Response, ReasonerError> {
        match sentence {
            Sentence::IdentifierIsAType(fact) => Ok(self.store.put_is_fact(fact).into()),
            Sentence::IdentifierHasQuantityType(fact) => {
                self.store.put_has_fact(fact)?;
                Ok(Response::Ok)
            }
            Sentence::FrequencyTypeIsType(rule) => {
                self.store.put_is_rule(rule);
                Ok(rule_response(rule.frequency_type.frequency))
            }
            Sentence::FrequencyTypeHasQuantityType(rule) => {
                self.store.put_has_rule(rule);
                Ok(rule_response(rule.frequency_type.frequency))
            }
            Sentence::IsIdentifierAType(question) => Ok(self.query(question)),
            Sentence::Identifier(_)
            | Sentence::TypeName(_)
            | Sentence::Quantity(_)
            | Sentence::QuantityType(_)
            | Sentence::FrequencyType(_)
            | Sentence::FrequencyTypeRelationship(_) => Ok(Response::NotYetImplemented),
        }
    }

    /// Answers a membership query by transitive closure over the rules.
    #[must_use]
    pub fn query(&self, question: &IsIdentifierAType) -> Response {
        reasoner::resolve(&self.store, question)
    }

    /// All identifiers mentioned by any fact, sorted. Feeds the identifier
    /// list of the display surface.
    #[must_use]
    pub fn known_identifiers(&self) -> Vec<Identifier> {
        self.store.known_identifiers()
    }

    /// All types mentioned anywhere, sorted. Feeds the type list of the
    /// display surface.
    #[must_use]
    pub fn known_types(&self) -> Vec<TypeName> {
        self.store.known_types()
    }

    /// The direct types recorded for an identifier.
    #[must_use]
    pub fn is_facts(&self, identifier: &Identifier) -> Option<BTreeSet<TypeName>> {
        self.store.is_facts_of(identifier)
    }

    /// The quantities recorded for an identifier, rule-implied ones
    /// included.
    #[must_use]
    pub fn has_facts(&self, identifier: &Identifier) -> Option<BTreeSet<QuantityType>> {
        self.store.has_facts_of(identifier)
    }

    /// Expands everything transitively owned through `EVERY … HAS …` rules
    /// starting from one counted type.
    ///
    /// # Errors
    ///
    /// Returns a [`ReasonerError`] on cyclic ownership rules or count
    /// overflow.
    pub fn owned_quantities(
        &self,
        origin: &QuantityType,
    ) -> Result<BTreeMap<TypeName, u64>, ReasonerError> {
        reasoner::owned_quantities(&self.store, origin)
    }
}

const fn rule_response(frequency: Frequency) -> Response {
    match frequency {
        Frequency::Every | Frequency::NotASingle => Response::Ok,
        // Parsed and recorded, semantics unresolved.
        Frequency::NotEvery => Response::NotYetImplemented,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new().expect("grammar self-check")
    }

    fn submit(session: &mut Session, line: &str) -> Response {
        let sentence = session.parse(line).unwrap_or_else(|| panic!("no parse: {line}"));
        session.submit(&sentence).unwrap_or_else(|e| panic!("submit {line}: {e}"))
    }

    #[test]
    fn bare_atoms_are_not_yet_actionable() {
        let mut session = session();
        for line in ["DAVID", "7", "3 WHEEL", "EVERY ARTIST", "EVERY ARTIST IS A"] {
            assert_eq!(
                submit(&mut session, line),
                Response::NotYetImplemented,
                "line: {line}"
            );
        }
    }

    #[test]
    fn not_every_rules_come_back_not_yet_implemented() {
        let mut session = session();
        assert_eq!(
            submit(&mut session, "NOT EVERY ARTIST IS A GENIUS"),
            Response::NotYetImplemented
        );
        // And they stay inert: the rule must not make GENIUS reachable.
        submit(&mut session, "DAVID IS A ARTIST");
        let question = session.parse("IS DAVID A GENIUS?").unwrap();
        let Sentence::IsIdentifierAType(question) = question else {
            panic!("expected a query");
        };
        assert_eq!(session.query(&question), Response::NeedMoreInfo);
    }

    #[test]
    fn submitting_a_query_sentence_delegates_to_query() {
        let mut session = session();
        submit(&mut session, "DAVID IS A PROGRAMMER");
        assert_eq!(submit(&mut session, "IS DAVID A PROGRAMMER?"), Response::Correct);
    }

    #[test]
    fn known_lists_feed_the_display_surface() {
        let mut session = session();
        submit(&mut session, "DAVID IS A PROGRAMMER");
        submit(&mut session, "EVERY PROGRAMMER IS A GENIUS");
        submit(&mut session, "MYCAR HAS 4 WHEEL");

        assert_eq!(
            session.known_identifiers(),
            vec![Identifier::new("DAVID"), Identifier::new("MYCAR")]
        );
        assert_eq!(
            session.known_types(),
            vec![
                TypeName::new("GENIUS"),
                TypeName::new("PROGRAMMER"),
                TypeName::new("WHEEL"),
            ]
        );
    }

    #[test]
    fn cyclic_ownership_surfaces_as_an_error_from_submit() {
        let mut session = session();
        submit(&mut session, "EVERY BOX HAS 2 CRATE");
        submit(&mut session, "EVERY CRATE HAS 2 BOX");

        let fact = session.parse("DAVID HAS 1 BOX").unwrap();
        let err = session.submit(&fact).unwrap_err();
        assert!(matches!(err, ReasonerError::CyclicHasRules { .. }));
    }
}
