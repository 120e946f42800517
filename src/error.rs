//! Error types for credo.
//!
//! All errors are strongly typed using thiserror. Recoverable conditions
//! (a line that matches no grammar form, duplicate submissions, queries about
//! unknown entities) are ordinary values — `Option` or [`Response`] — and
//! never appear here. The types below cover the two genuinely exceptional
//! situations: a grammar that fails its own startup self-check, and rule data
//! whose expansion cannot terminate or be represented.
//!
//! [`Response`]: crate::Response

use thiserror::Error;

use crate::atom::TypeName;

/// Defects detected while assembling the sentence grammar.
///
/// Every variant here is a programming error, not a runtime condition:
/// [`Grammar::new`](crate::Grammar::new) runs a self-check that constructs
/// one representative of every sentence form from a canonical synthetic slot
/// list, and a failure means the registration table and the slot arithmetic
/// of some form have drifted apart. Callers should abort initialization
/// loudly.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// A sentence form's pattern failed to compile.
    #[error("pattern for {form} failed to compile: {source}")]
    Pattern {
        /// The sentence form whose pattern is broken.
        form: &'static str,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A constructor was handed the wrong number of match slots.
    #[error("{form} expects exactly {expected} match slots, got {actual}")]
    SlotArity {
        /// The sentence form being constructed.
        form: &'static str,
        /// Slots the form consumes.
        expected: usize,
        /// Slots actually supplied.
        actual: usize,
    },

    /// A match slot could not be converted into its atom.
    #[error("{form} cannot be built from match slot '{slot}'")]
    BadSlot {
        /// The sentence form being constructed.
        form: &'static str,
        /// The offending slot text.
        slot: String,
    },

    /// The startup self-check failed for a sentence form.
    #[error("grammar self-check failed for {form}: {reason}")]
    SelfCheck {
        /// The sentence form that failed.
        form: &'static str,
        /// What went wrong.
        reason: String,
    },
}

/// Modeling errors surfaced by rule expansion.
///
/// Subtype reachability is structurally cycle-safe (the worklist deduplicates
/// on enqueue), so cyclic IS-A rules merely stop expanding. Ownership
/// expansion multiplies counts along the path instead, so a cycle there would
/// grow forever; it is reported rather than followed.
#[derive(Debug, Error)]
pub enum ReasonerError {
    /// An `EVERY … HAS …` rule chain leads back to a type already being
    /// expanded on the current path.
    #[error("cyclic HAS rules: {type_name} owns itself through rule expansion")]
    CyclicHasRules {
        /// The type that re-entered its own expansion.
        type_name: TypeName,
    },

    /// Multiplying counts along an ownership chain exceeded the
    /// representable range.
    #[error("quantity overflow while expanding ownership of {type_name}")]
    QuantityOverflow {
        /// The type whose count overflowed.
        type_name: TypeName,
    },
}
