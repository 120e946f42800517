//! # credo — a typed fact/rule knowledge base
//!
//! credo ingests short, rigidly structured declarative and interrogative
//! sentences (`EVERY ARTIST IS A GENIUS`, `DAVID HAS 2 WHEEL`,
//! `IS DAVID A PROGRAMMER?`) and maintains a knowledge base of typed facts
//! and quantified rules, answering membership and ownership queries by
//! transitive-closure reasoning.
//!
//! ## Core Concepts
//!
//! - **Fact**: a ground statement about a specific identifier
//!   (`DAVID IS A PROGRAMMER`)
//! - **Rule**: a statement about all instances of a type, qualified by a
//!   frequency (`EVERY ARTIST IS A GENIUS`, `NOT A SINGLE ARTIST IS A BORE`)
//! - **Query**: a membership question resolved over the closure of the
//!   `IS_A` rule graph, with negative rules detecting contradictions
//! - **Quantity propagation**: multiplicative expansion of `HAS` ownership
//!   across chained rules, bill-of-materials style
//!
//! ## Usage
//!
//! ```
//! use credo::{normalize, Response, Session};
//!
//! let mut session = Session::new().expect("grammar self-check");
//!
//! for line in [
//!     "DAVID IS A PROGRAMMER",
//!     "EVERY PROGRAMMER IS A GENIUS",
//! ] {
//!     let sentence = session.parse(&normalize(line)).expect("valid sentence");
//!     session.submit(&sentence).expect("consistent rules");
//! }
//!
//! let question = session.parse(&normalize("is david a genius?")).unwrap();
//! assert_eq!(session.submit(&question).unwrap(), Response::Correct);
//! ```
//!
//! The caller owns normalization ([`normalize`]) and the display surface;
//! the core is single-threaded, synchronous, and purely in-memory.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod atom;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod reasoner;
pub mod response;
pub mod sentence;
pub mod store;

// Re-export primary types at crate root for convenience
pub use atom::{
    Frequency, FrequencyType, Identifier, Quantity, QuantityType, Relationship, TypeName,
};
pub use engine::Session;
pub use error::{GrammarError, ReasonerError};
pub use grammar::{normalize, Grammar};
pub use response::Response;
pub use sentence::{
    FrequencyTypeHasQuantityType, FrequencyTypeIsType, FrequencyTypeRelationship,
    IdentifierHasQuantityType, IdentifierIsAType, IsIdentifierAType, Sentence,
};
pub use store::{FactOutcome, KnowledgeStore, MultiMap, PutOutcome};
