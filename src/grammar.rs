//! The grammar dispatcher.
//!
//! A [`Grammar`] is a fixed, ordered registration table of
//! `(compiled pattern, constructor)` pairs — one entry per sentence form,
//! assembled statically instead of discovered reflectively. [`Grammar::parse`]
//! tries the table top to bottom and returns the first whole-line match,
//! rebuilt from its capture slots.
//!
//! The actionable forms (facts, rules, queries) are mutually exclusive by
//! construction, so their relative order cannot change the outcome. The bare
//! atoms overlap on the surface (a single word is both a valid identifier and
//! a valid type name); the table orders composite forms first and fixes the
//! tie among atoms deterministically.
//!
//! Construction runs a self-check: every form must build from its canonical
//! synthetic slot list, and the built sentence's rendering must match the
//! form's own pattern and rebuild to an equal value. A failure is a
//! programming defect and aborts initialization.

use regex::Regex;

use crate::atom::{FrequencyType, Identifier, Quantity, QuantityType, TypeName};
use crate::error::GrammarError;
use crate::sentence::{
    FrequencyTypeHasQuantityType, FrequencyTypeIsType, FrequencyTypeRelationship,
    IdentifierHasQuantityType, IdentifierIsAType, IsIdentifierAType, Sentence,
};

type Constructor = fn(&[&str]) -> Result<Sentence, GrammarError>;

struct GrammarRule {
    form: &'static str,
    regex: Regex,
    canonical: &'static [&'static str],
    build: Constructor,
}

/// Normalizes a raw input line the way the grammar expects it: trimmed,
/// upper-cased, internal whitespace runs collapsed to single spaces.
///
/// This is the caller-side half of the parsing contract. [`Grammar::parse`]
/// assumes its input has already been through here.
///
/// # Examples
///
/// ```
/// use credo::normalize;
///
/// assert_eq!(normalize("  david   is a\tprogrammer "), "DAVID IS A PROGRAMMER");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.to_uppercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The compiled sentence grammar.
///
/// # Examples
///
/// ```
/// use credo::{Grammar, Sentence};
///
/// let grammar = Grammar::new().expect("grammar self-check");
/// let sentence = grammar.parse("DAVID IS A PROGRAMMER").unwrap();
/// assert!(matches!(sentence, Sentence::IdentifierIsAType(_)));
///
/// assert_eq!(grammar.parse("COMPLETE GIBBERISH ### LINE"), None);
/// ```
pub struct Grammar {
    table: Vec<GrammarRule>,
}

impl Grammar {
    /// Compiles the registration table and runs the startup self-check.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] if any form's pattern fails to compile or
    /// any form fails the self-check. Both indicate a defect in the grammar
    /// itself; callers should abort initialization.
    pub fn new() -> Result<Self, GrammarError> {
        let grammar = Self {
            table: registration_table()?,
        };
        grammar.self_check()?;
        Ok(grammar)
    }

    /// Parses one normalized line into the single sentence form it matches.
    ///
    /// Returns `None` when no form matches. That is an ordinary outcome
    /// ("INVALID FORMAT" territory for the caller), not an error.
    #[must_use]
    pub fn parse(&self, line: &str) -> Option<Sentence> {
        for rule in &self.table {
            let Some(captures) = rule.regex.captures(line) else {
                continue;
            };
            let slots: Vec<&str> = captures
                .iter()
                .skip(1)
                .flatten()
                .map(|slot| slot.as_str())
                .collect();
            if let Ok(sentence) = (rule.build)(&slots) {
                return Some(sentence);
            }
        }
        None
    }

    fn self_check(&self) -> Result<(), GrammarError> {
        for rule in &self.table {
            let built = (rule.build)(rule.canonical).map_err(|source| {
                GrammarError::SelfCheck {
                    form: rule.form,
                    reason: format!("canonical slots {:?} rejected: {source}", rule.canonical),
                }
            })?;

            // The canonical rendering must land back on this form's own
            // pattern and rebuild to an equal value.
            let rendered = built.to_string();
            let Some(captures) = rule.regex.captures(&rendered) else {
                return Err(GrammarError::SelfCheck {
                    form: rule.form,
                    reason: format!("rendering '{rendered}' does not match its own pattern"),
                });
            };
            let slots: Vec<&str> = captures
                .iter()
                .skip(1)
                .flatten()
                .map(|slot| slot.as_str())
                .collect();
            let reparsed = (rule.build)(&slots).map_err(|source| GrammarError::SelfCheck {
                form: rule.form,
                reason: format!("rendering '{rendered}' failed to rebuild: {source}"),
            })?;
            if reparsed != built {
                return Err(GrammarError::SelfCheck {
                    form: rule.form,
                    reason: format!("rendering '{rendered}' rebuilt to a different value"),
                });
            }
        }
        Ok(())
    }
}

fn compile(form: &'static str, pattern: &str) -> Result<Regex, GrammarError> {
    // Whole-line semantics; the pattern fragments themselves are unanchored.
    Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|source| GrammarError::Pattern { form, source })
}

fn registration_table() -> Result<Vec<GrammarRule>, GrammarError> {
    let specs: [(&'static str, String, &'static [&'static str], Constructor); 11] = [
        (
            IsIdentifierAType::FORM,
            IsIdentifierAType::pattern(),
            &["A", "A"],
            |slots| Ok(Sentence::IsIdentifierAType(IsIdentifierAType::from_slots(slots)?)),
        ),
        (
            FrequencyTypeHasQuantityType::FORM,
            FrequencyTypeHasQuantityType::pattern(),
            &["EVERY", "A", "1", "A"],
            |slots| {
                Ok(Sentence::FrequencyTypeHasQuantityType(
                    FrequencyTypeHasQuantityType::from_slots(slots)?,
                ))
            },
        ),
        // The bare-relationship form must precede the membership rule: a
        // trailing lone article ("EVERY ARTIST IS A") belongs to it, not to
        // a rule targeting a type literally named "A".
        (
            FrequencyTypeRelationship::FORM,
            FrequencyTypeRelationship::pattern(),
            &["EVERY", "A", "IS A"],
            |slots| {
                Ok(Sentence::FrequencyTypeRelationship(
                    FrequencyTypeRelationship::from_slots(slots)?,
                ))
            },
        ),
        (
            FrequencyTypeIsType::FORM,
            FrequencyTypeIsType::pattern(),
            &["EVERY", "A", "A"],
            |slots| Ok(Sentence::FrequencyTypeIsType(FrequencyTypeIsType::from_slots(slots)?)),
        ),
        (
            IdentifierHasQuantityType::FORM,
            IdentifierHasQuantityType::pattern(),
            &["A", "1", "A"],
            |slots| {
                Ok(Sentence::IdentifierHasQuantityType(
                    IdentifierHasQuantityType::from_slots(slots)?,
                ))
            },
        ),
        (
            IdentifierIsAType::FORM,
            IdentifierIsAType::pattern(),
            &["A", "A"],
            |slots| Ok(Sentence::IdentifierIsAType(IdentifierIsAType::from_slots(slots)?)),
        ),
        (
            "FrequencyType",
            FrequencyType::pattern(),
            &["EVERY", "A"],
            |slots| Ok(Sentence::FrequencyType(FrequencyType::from_slots(slots)?)),
        ),
        (
            "QuantityType",
            QuantityType::pattern(),
            &["1", "A"],
            |slots| Ok(Sentence::QuantityType(QuantityType::from_slots(slots)?)),
        ),
        // A single bare word is both a valid identifier and a valid type
        // name; the table resolves it to an identifier.
        (
            "Identifier",
            Identifier::PATTERN.to_string(),
            &["A"],
            |slots| Ok(Sentence::Identifier(Identifier::from_slots(slots)?)),
        ),
        (
            "Quantity",
            Quantity::PATTERN.to_string(),
            &["1"],
            |slots| Ok(Sentence::Quantity(Quantity::from_slots(slots)?)),
        ),
        (
            "Type",
            TypeName::PATTERN.to_string(),
            &["A"],
            |slots| Ok(Sentence::TypeName(TypeName::from_slots(slots)?)),
        ),
    ];

    specs
        .into_iter()
        .map(|(form, pattern, canonical, build)| {
            Ok(GrammarRule {
                form,
                regex: compile(form, &pattern)?,
                canonical,
                build,
            })
        })
        .collect()
}
