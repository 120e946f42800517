//! Lexical atoms: the smallest parseable units of the grammar.
//!
//! Every atom owns three things: the regex fragment that matches its surface
//! form, a fixed arity (how many capture slots the fragment produces), and a
//! constructor that rebuilds the atom from exactly that many matched slots.
//! Composite sentence forms concatenate these fragments and sum these
//! arities, so slot arithmetic stays exact by construction.
//!
//! Input reaching the atoms has already been normalized (trimmed,
//! upper-cased, internal whitespace collapsed to single spaces).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;

/// Checks that a constructor received exactly the slots it consumes.
pub(crate) fn expect_arity(
    form: &'static str,
    expected: usize,
    slots: &[&str],
) -> Result<(), GrammarError> {
    if slots.len() == expected {
        Ok(())
    } else {
        Err(GrammarError::SlotArity {
            form,
            expected,
            actual: slots.len(),
        })
    }
}

/// The name of a specific instance, e.g. `DAVID`.
///
/// Identifiers are opaque: equality is by name, and the name is already
/// case-normalized by the time it gets here. An identifier is never
/// interchangeable with a [`TypeName`] even though both are plain names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// One capturing group: a name with optional single-underscore joints.
    pub(crate) const PATTERN: &'static str = "([A-Za-z]+(?:_?[A-Za-z0-9]+)*)";

    /// Capture slots this atom consumes.
    pub(crate) const ARITY: usize = 1;

    /// Creates an identifier from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identifier's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity("Identifier", Self::ARITY, slots)?;
        Ok(Self(slots[0].to_string()))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The name of a category, e.g. `PROGRAMMER`.
///
/// Same shape as [`Identifier`] but semantically distinct; the type system
/// keeps the two apart on purpose. (Called `TypeName` rather than `Type`
/// only to stay out of the way of the Rust keyword soup.)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// One capturing group: a bare alphanumeric name.
    pub(crate) const PATTERN: &'static str = "([A-Za-z]+[A-Za-z0-9]*)";

    /// Capture slots this atom consumes.
    pub(crate) const ARITY: usize = 1;

    /// Creates a type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The type's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity("Type", Self::ARITY, slots)?;
        Ok(Self(slots[0].to_string()))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative count, 1–7 decimal digits on the surface.
///
/// The articles `A` and `AN` are accepted as synonyms for the count 1, so
/// `DAVID HAS A CAR` and `DAVID HAS 1 CAR` are the same sentence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    /// One capturing group: an article or up to seven digits.
    pub(crate) const PATTERN: &'static str = "(A|AN|\\d{1,7})";

    /// Capture slots this atom consumes.
    pub(crate) const ARITY: usize = 1;

    /// Creates a quantity from a raw count.
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    /// The underlying count.
    #[must_use]
    pub const fn count(self) -> u64 {
        self.0
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity("Quantity", Self::ARITY, slots)?;
        match slots[0] {
            "A" | "AN" => Ok(Self(1)),
            digits => digits.parse().map(Self).map_err(|_| GrammarError::BadSlot {
                form: "Quantity",
                slot: digits.to_string(),
            }),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// "N of Type" — a count paired with the type being counted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuantityType {
    /// How many.
    pub quantity: Quantity,
    /// Of what.
    pub type_name: TypeName,
}

impl QuantityType {
    /// Capture slots this form consumes.
    pub(crate) const ARITY: usize = Quantity::ARITY + TypeName::ARITY;

    /// Creates a quantity/type pair.
    pub fn new(quantity: Quantity, type_name: TypeName) -> Self {
        Self {
            quantity,
            type_name,
        }
    }

    /// The concatenated pattern of the two child atoms.
    pub(crate) fn pattern() -> String {
        format!("{} {}", Quantity::PATTERN, TypeName::PATTERN)
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity("QuantityType", Self::ARITY, slots)?;
        let (quantity, type_name) = slots.split_at(Quantity::ARITY);
        Ok(Self {
            quantity: Quantity::from_slots(quantity)?,
            type_name: TypeName::from_slots(type_name)?,
        })
    }
}

impl fmt::Display for QuantityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.type_name)
    }
}

/// How widely a rule applies to the instances of its subject type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Universal positive: `EVERY`.
    Every,
    /// Existential negative: `NOT EVERY`. Parsed and stored, but its
    /// semantics are unresolved and the reasoner never consults it.
    NotEvery,
    /// Universal negative: `NOT A SINGLE`.
    NotASingle,
}

impl Frequency {
    /// One capturing group over the three surface keywords.
    pub(crate) const PATTERN: &'static str = "(EVERY|NOT EVERY|NOT A SINGLE)";

    /// Capture slots this atom consumes.
    pub(crate) const ARITY: usize = 1;

    /// The surface keyword for this frequency.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Every => "EVERY",
            Self::NotEvery => "NOT EVERY",
            Self::NotASingle => "NOT A SINGLE",
        }
    }

    /// Parses a surface keyword back into a frequency.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "EVERY" => Some(Self::Every),
            "NOT EVERY" => Some(Self::NotEvery),
            "NOT A SINGLE" => Some(Self::NotASingle),
            _ => None,
        }
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity("Frequency", Self::ARITY, slots)?;
        Self::from_keyword(slots[0]).ok_or_else(|| GrammarError::BadSlot {
            form: "Frequency",
            slot: slots[0].to_string(),
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A rule's subject: a frequency qualifying a type, e.g. `EVERY ARTIST`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrequencyType {
    /// How widely the rule applies.
    pub frequency: Frequency,
    /// The subject type.
    pub type_name: TypeName,
}

impl FrequencyType {
    /// Capture slots this form consumes.
    pub(crate) const ARITY: usize = Frequency::ARITY + TypeName::ARITY;

    /// Creates a rule subject.
    pub fn new(frequency: Frequency, type_name: TypeName) -> Self {
        Self {
            frequency,
            type_name,
        }
    }

    /// Shorthand for the `EVERY <type>` subject, the key shape both rule
    /// stores are probed with during reasoning.
    pub fn every(type_name: TypeName) -> Self {
        Self::new(Frequency::Every, type_name)
    }

    /// Shorthand for the `NOT A SINGLE <type>` subject.
    pub fn not_a_single(type_name: TypeName) -> Self {
        Self::new(Frequency::NotASingle, type_name)
    }

    /// The concatenated pattern of the two child atoms.
    pub(crate) fn pattern() -> String {
        format!("{} {}", Frequency::PATTERN, TypeName::PATTERN)
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity("FrequencyType", Self::ARITY, slots)?;
        let (frequency, type_name) = slots.split_at(Frequency::ARITY);
        Ok(Self {
            frequency: Frequency::from_slots(frequency)?,
            type_name: TypeName::from_slots(type_name)?,
        })
    }
}

impl fmt::Display for FrequencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.frequency, self.type_name)
    }
}

/// The two relations the knowledge base tracks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    /// Ownership: `<subject> HAS <quantity> <type>`.
    Has,
    /// Membership: `<subject> IS [A|AN] <type>`.
    IsA,
}

impl Relationship {
    /// One capturing group over the two surface keywords. `IS A` appears
    /// literally here (no article elision) — this is the form used when the
    /// relationship itself is a captured slot.
    pub(crate) const CAPTURE_PATTERN: &'static str = "(HAS|IS A)";

    /// Capture slots the captured form consumes.
    pub(crate) const ARITY: usize = 1;

    /// The non-capturing pattern for this relationship as connective tissue
    /// between two captured atoms. For `IS_A` the article is optional as a
    /// unit: `IS`, `IS A`, and `IS AN` all match.
    pub(crate) const fn pattern(self) -> &'static str {
        match self {
            Self::Has => "HAS",
            Self::IsA => "IS(?: AN?)?",
        }
    }

    /// The surface keyword for this relationship.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Has => "HAS",
            Self::IsA => "IS A",
        }
    }

    /// Parses a captured keyword back into a relationship.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "HAS" => Some(Self::Has),
            "IS A" => Some(Self::IsA),
            _ => None,
        }
    }

    pub(crate) fn from_slots(slots: &[&str]) -> Result<Self, GrammarError> {
        expect_arity("Relationship", Self::ARITY, slots)?;
        Self::from_keyword(slots[0]).ok_or_else(|| GrammarError::BadSlot {
            form: "Relationship",
            slot: slots[0].to_string(),
        })
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_accepts_articles_as_one() {
        assert_eq!(Quantity::from_slots(&["A"]).unwrap(), Quantity::new(1));
        assert_eq!(Quantity::from_slots(&["AN"]).unwrap(), Quantity::new(1));
        assert_eq!(Quantity::from_slots(&["42"]).unwrap(), Quantity::new(42));
    }

    #[test]
    fn quantity_rejects_garbage_slot() {
        let err = Quantity::from_slots(&["X9"]).unwrap_err();
        assert!(matches!(err, GrammarError::BadSlot { form: "Quantity", .. }));
    }

    #[test]
    fn arity_mismatch_is_reported_not_panicked() {
        let err = QuantityType::from_slots(&["1"]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::SlotArity {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn composite_atoms_slice_slots_left_to_right() {
        let qt = QuantityType::from_slots(&["4", "WHEEL"]).unwrap();
        assert_eq!(qt.quantity, Quantity::new(4));
        assert_eq!(qt.type_name, TypeName::new("WHEEL"));

        let ft = FrequencyType::from_slots(&["NOT A SINGLE", "GENIUS"]).unwrap();
        assert_eq!(ft.frequency, Frequency::NotASingle);
        assert_eq!(ft.type_name, TypeName::new("GENIUS"));
    }

    #[test]
    fn frequency_keywords_round_trip() {
        for frequency in [Frequency::Every, Frequency::NotEvery, Frequency::NotASingle] {
            assert_eq!(Frequency::from_keyword(frequency.keyword()), Some(frequency));
        }
    }

    #[test]
    fn display_is_canonical_surface_form() {
        let qt = QuantityType::new(Quantity::new(1), TypeName::new("CAR"));
        assert_eq!(qt.to_string(), "1 CAR");

        let ft = FrequencyType::every(TypeName::new("ARTIST"));
        assert_eq!(ft.to_string(), "EVERY ARTIST");
    }
}
