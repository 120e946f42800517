//! The response vocabulary surfaced to callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::FactOutcome;

/// Everything `submit` and `query` can say back.
///
/// `Display` renders the screaming-snake surface form the presentation layer
/// echoes next to the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// The fact or rule was recorded.
    Ok,
    /// The grammar accepts this form but nothing acts on it yet.
    NotYetImplemented,
    /// The queried membership holds.
    Correct,
    /// The queried membership is ruled out by a negative rule.
    Incorrect,
    /// Neither provable nor contradicted with what is known.
    NeedMoreInfo,
    /// The queried identifier has never been mentioned.
    UnknownIdentifier,
    /// The queried type has never been mentioned.
    UnknownType,
    /// The submitted fact already exists as a direct edge.
    DirectMappingAlreadyExists,
    /// The submitted fact is already implied by rule closure.
    IndirectMappingAlreadyExists,
    /// The submitted fact was new and is now a direct edge.
    NewDirectMappingCreated,
}

impl Response {
    /// The surface keyword for this response.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NotYetImplemented => "NOT_YET_IMPLEMENTED",
            Self::Correct => "CORRECT",
            Self::Incorrect => "INCORRECT",
            Self::NeedMoreInfo => "NEED_MORE_INFO",
            Self::UnknownIdentifier => "UNKNOWN_IDENTIFIER",
            Self::UnknownType => "UNKNOWN_TYPE",
            Self::DirectMappingAlreadyExists => "DIRECT_MAPPING_ALREADY_EXISTS",
            Self::IndirectMappingAlreadyExists => "INDIRECT_MAPPING_ALREADY_EXISTS",
            Self::NewDirectMappingCreated => "NEW_DIRECT_MAPPING_CREATED",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl From<FactOutcome> for Response {
    fn from(outcome: FactOutcome) -> Self {
        match outcome {
            FactOutcome::NewDirectMappingCreated => Self::NewDirectMappingCreated,
            FactOutcome::DirectMappingAlreadyExists => Self::DirectMappingAlreadyExists,
            FactOutcome::IndirectMappingAlreadyExists => Self::IndirectMappingAlreadyExists,
        }
    }
}
