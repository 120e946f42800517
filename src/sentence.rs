//! The closed set of parseable sentence forms.
//!
//! Each composite form is built the same way: its pattern is the
//! concatenation of its children's patterns (interleaved with literal
//! relationship keywords and single-space separators), its arity is the sum
//! of its children's arities in left-to-right declaration order, and its
//! constructor re-slices the flat list of matched slots into contiguous
//! sub-lists, one per child, recursing into each child's constructor. A
//! child with N capturing positions always consumes exactly N consecutive
//! slots — the grammar self-check verifies this for every form at startup.
//!
//! `Display` renders the canonical surface form, so for every sentence `s`,
//! `parse(&s.to_string())` yields `s` back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::atom::{
    expect_arity, FrequencyType, Identifier, Quantity, QuantityType, Relationship, TypeName,
};
use crate::error::GrammarError;

/// Instance fact: `DAVID IS A PROGRAMMER`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdentifierIsAType {
    /// The instance.
    pub identifier: Identifier,
    /// The type it belongs to.
    pub type_name: TypeName,
}

impl IdentifierIsAType {
    pub(crate) const FORM: &'static str = "IdentifierIsAType";
    pub(crate) const ARITY: usize = Identifier::ARITY + TypeName::ARITY;

    /// Creates the fact.
    pub fn new(identifier: Identifier, type_name: TypeName) -> Self {
        Self {
            identifier,
            type_name,
        }
    }

    pub(crate) fn pattern() -> String {
        format!(
            "{} {} {}",
            Identifier::PATTERN,
            Relationship::IsA.pattern(),
            TypeName::PATTERN
        )
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity(Self::FORM, Self::ARITY, slots)?;
        let (identifier, type_name) = slots.split_at(Identifier::ARITY);
        Ok(Self {
            identifier: Identifier::from_slots(identifier)?,
            type_name: TypeName::from_slots(type_name)?,
        })
    }
}

impl fmt::Display for IdentifierIsAType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IS A {}", self.identifier, self.type_name)
    }
}

/// Instance fact: `DAVID HAS 2 WHEEL`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdentifierHasQuantityType {
    /// The owner.
    pub identifier: Identifier,
    /// What it owns, and how many.
    pub quantity_type: QuantityType,
}

impl IdentifierHasQuantityType {
    pub(crate) const FORM: &'static str = "IdentifierHasQuantityType";
    pub(crate) const ARITY: usize = Identifier::ARITY + QuantityType::ARITY;

    /// Creates the fact.
    pub fn new(identifier: Identifier, quantity_type: QuantityType) -> Self {
        Self {
            identifier,
            quantity_type,
        }
    }

    pub(crate) fn pattern() -> String {
        format!(
            "{} {} {}",
            Identifier::PATTERN,
            Relationship::Has.pattern(),
            QuantityType::pattern()
        )
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity(Self::FORM, Self::ARITY, slots)?;
        let (identifier, quantity_type) = slots.split_at(Identifier::ARITY);
        Ok(Self {
            identifier: Identifier::from_slots(identifier)?,
            quantity_type: QuantityType::from_slots(quantity_type)?,
        })
    }
}

impl fmt::Display for IdentifierHasQuantityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} HAS {}", self.identifier, self.quantity_type)
    }
}

/// Membership rule: `EVERY ARTIST IS A GENIUS`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrequencyTypeIsType {
    /// The rule subject.
    pub frequency_type: FrequencyType,
    /// The target type.
    pub type_name: TypeName,
}

impl FrequencyTypeIsType {
    pub(crate) const FORM: &'static str = "FrequencyTypeIsType";
    pub(crate) const ARITY: usize = FrequencyType::ARITY + TypeName::ARITY;

    /// Creates the rule.
    pub fn new(frequency_type: FrequencyType, type_name: TypeName) -> Self {
        Self {
            frequency_type,
            type_name,
        }
    }

    pub(crate) fn pattern() -> String {
        format!(
            "{} {} {}",
            FrequencyType::pattern(),
            Relationship::IsA.pattern(),
            TypeName::PATTERN
        )
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity(Self::FORM, Self::ARITY, slots)?;
        let (frequency_type, type_name) = slots.split_at(FrequencyType::ARITY);
        Ok(Self {
            frequency_type: FrequencyType::from_slots(frequency_type)?,
            type_name: TypeName::from_slots(type_name)?,
        })
    }
}

impl fmt::Display for FrequencyTypeIsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IS A {}", self.frequency_type, self.type_name)
    }
}

/// Ownership rule: `EVERY CAR HAS 4 WHEEL`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrequencyTypeHasQuantityType {
    /// The rule subject.
    pub frequency_type: FrequencyType,
    /// What every instance of the subject owns.
    pub quantity_type: QuantityType,
}

impl FrequencyTypeHasQuantityType {
    pub(crate) const FORM: &'static str = "FrequencyTypeHasQuantityType";
    pub(crate) const ARITY: usize = FrequencyType::ARITY + QuantityType::ARITY;

    /// Creates the rule.
    pub fn new(frequency_type: FrequencyType, quantity_type: QuantityType) -> Self {
        Self {
            frequency_type,
            quantity_type,
        }
    }

    pub(crate) fn pattern() -> String {
        format!(
            "{} {} {}",
            FrequencyType::pattern(),
            Relationship::Has.pattern(),
            QuantityType::pattern()
        )
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity(Self::FORM, Self::ARITY, slots)?;
        let (frequency_type, quantity_type) = slots.split_at(FrequencyType::ARITY);
        Ok(Self {
            frequency_type: FrequencyType::from_slots(frequency_type)?,
            quantity_type: QuantityType::from_slots(quantity_type)?,
        })
    }
}

impl fmt::Display for FrequencyTypeHasQuantityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} HAS {}", self.frequency_type, self.quantity_type)
    }
}

/// A rule subject naming a bare relationship: `EVERY ARTIST IS A`.
///
/// Accepted by the grammar but not yet actionable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrequencyTypeRelationship {
    /// The rule subject.
    pub frequency_type: FrequencyType,
    /// The bare relationship.
    pub relationship: Relationship,
}

impl FrequencyTypeRelationship {
    pub(crate) const FORM: &'static str = "FrequencyTypeRelationship";
    pub(crate) const ARITY: usize = FrequencyType::ARITY + Relationship::ARITY;

    /// Creates the form.
    pub fn new(frequency_type: FrequencyType, relationship: Relationship) -> Self {
        Self {
            frequency_type,
            relationship,
        }
    }

    pub(crate) fn pattern() -> String {
        format!(
            "{} {}",
            FrequencyType::pattern(),
            Relationship::CAPTURE_PATTERN
        )
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity(Self::FORM, Self::ARITY, slots)?;
        let (frequency_type, relationship) = slots.split_at(FrequencyType::ARITY);
        Ok(Self {
            frequency_type: FrequencyType::from_slots(frequency_type)?,
            relationship: Relationship::from_slots(relationship)?,
        })
    }
}

impl fmt::Display for FrequencyTypeRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.frequency_type, self.relationship)
    }
}

/// Membership query, in either of two surface forms.
///
/// `IS DAVID A PROGRAMMER?` (article and trailing `?` both optional) or
/// `DAVID IS A PROGRAMMER?` (article optional, trailing `?` mandatory —
/// without it the line is the fact form, not a question). Both surfaces
/// produce the same two slots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IsIdentifierAType {
    /// The instance being asked about.
    pub identifier: Identifier,
    /// The type being tested for membership.
    pub type_name: TypeName,
}

impl IsIdentifierAType {
    pub(crate) const FORM: &'static str = "IsIdentifierAType";
    pub(crate) const ARITY: usize = Identifier::ARITY + TypeName::ARITY;

    /// Creates the query.
    pub fn new(identifier: Identifier, type_name: TypeName) -> Self {
        Self {
            identifier,
            type_name,
        }
    }

    /// Two alternatives inside one non-capturing group. Only one alternative
    /// participates in any match, so the dispatcher sees exactly two filled
    /// slots either way.
    pub(crate) fn pattern() -> String {
        format!(
            "(?:IS {id}(?: AN?)? {ty}\\??|{id} {is_a} {ty}\\?)",
            id = Identifier::PATTERN,
            ty = TypeName::PATTERN,
            is_a = Relationship::IsA.pattern(),
        )
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity(Self::FORM, Self::ARITY, slots)?;
        let (identifier, type_name) = slots.split_at(Identifier::ARITY);
        Ok(Self {
            identifier: Identifier::from_slots(identifier)?,
            type_name: TypeName::from_slots(type_name)?,
        })
    }
}

impl fmt::Display for IsIdentifierAType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IS {} A {}?", self.identifier, self.type_name)
    }
}

/// Everything a normalized line can parse into.
///
/// The bare atoms are accepted as standalone input but are not yet
/// actionable; submitting one yields
/// [`Response::NotYetImplemented`](crate::Response::NotYetImplemented).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentence {
    /// A bare instance name.
    Identifier(Identifier),
    /// A bare type name.
    TypeName(TypeName),
    /// A bare count.
    Quantity(Quantity),
    /// A bare count/type pair.
    QuantityType(QuantityType),
    /// A bare rule subject.
    FrequencyType(FrequencyType),
    /// Instance membership fact.
    IdentifierIsAType(IdentifierIsAType),
    /// Instance ownership fact.
    IdentifierHasQuantityType(IdentifierHasQuantityType),
    /// Membership rule.
    FrequencyTypeIsType(FrequencyTypeIsType),
    /// Ownership rule.
    FrequencyTypeHasQuantityType(FrequencyTypeHasQuantityType),
    /// Rule subject with a bare relationship.
    FrequencyTypeRelationship(FrequencyTypeRelationship),
    /// Membership query.
    IsIdentifierAType(IsIdentifierAType),
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(inner) => inner.fmt(f),
            Self::TypeName(inner) => inner.fmt(f),
            Self::Quantity(inner) => inner.fmt(f),
            Self::QuantityType(inner) => inner.fmt(f),
            Self::FrequencyType(inner) => inner.fmt(f),
            Self::IdentifierIsAType(inner) => inner.fmt(f),
            Self::IdentifierHasQuantityType(inner) => inner.fmt(f),
            Self::FrequencyTypeIsType(inner) => inner.fmt(f),
            Self::FrequencyTypeHasQuantityType(inner) => inner.fmt(f),
            Self::FrequencyTypeRelationship(inner) => inner.fmt(f),
            Self::IsIdentifierAType(inner) => inner.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Frequency;

    #[test]
    fn composite_arity_is_the_sum_of_child_arities() {
        assert_eq!(IdentifierIsAType::ARITY, 2);
        assert_eq!(IdentifierHasQuantityType::ARITY, 3);
        assert_eq!(FrequencyTypeIsType::ARITY, 3);
        assert_eq!(FrequencyTypeHasQuantityType::ARITY, 4);
        assert_eq!(FrequencyTypeRelationship::ARITY, 3);
        assert_eq!(IsIdentifierAType::ARITY, 2);
    }

    #[test]
    fn nested_slot_slicing_reaches_the_leaves() {
        let rule =
            FrequencyTypeHasQuantityType::from_slots(&["EVERY", "CAR", "4", "WHEEL"]).unwrap();
        assert_eq!(rule.frequency_type.frequency, Frequency::Every);
        assert_eq!(rule.frequency_type.type_name, TypeName::new("CAR"));
        assert_eq!(rule.quantity_type.quantity, Quantity::new(4));
        assert_eq!(rule.quantity_type.type_name, TypeName::new("WHEEL"));
    }

    #[test]
    fn relationship_slot_uses_the_captured_keyword() {
        let form = FrequencyTypeRelationship::from_slots(&["EVERY", "ARTIST", "IS A"]).unwrap();
        assert_eq!(form.relationship, Relationship::IsA);
        assert_eq!(form.to_string(), "EVERY ARTIST IS A");

        let form = FrequencyTypeRelationship::from_slots(&["EVERY", "ARTIST", "HAS"]).unwrap();
        assert_eq!(form.relationship, Relationship::Has);
    }

    #[test]
    fn short_slot_list_is_an_arity_error_not_a_panic() {
        let err = FrequencyTypeIsType::from_slots(&["EVERY", "ARTIST"]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::SlotArity {
                form: FrequencyTypeIsType::FORM,
                expected: 3,
                actual: 2,
            }
        ));
    }

    #[test]
    fn canonical_rendering_matches_the_surface_grammar() {
        let fact = IdentifierIsAType::new(Identifier::new("DAVID"), TypeName::new("PROGRAMMER"));
        assert_eq!(fact.to_string(), "DAVID IS A PROGRAMMER");

        let query = IsIdentifierAType::new(Identifier::new("DAVID"), TypeName::new("GENIUS"));
        assert_eq!(query.to_string(), "IS DAVID A GENIUS?");

        let rule = FrequencyTypeHasQuantityType::new(
            FrequencyType::every(TypeName::new("CAR")),
            QuantityType::new(Quantity::new(4), TypeName::new("WHEEL")),
        );
        assert_eq!(rule.to_string(), "EVERY CAR HAS 4 WHEEL");
    }
}
