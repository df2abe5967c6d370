//! Error type shared by the whole crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoverageError {
    /// A candidate arrived with a lower bound smaller than a previous one.
    #[error("input must be sorted by lower bound: got {current} after {previous}")]
    UnsortedInput { previous: String, current: String },

    /// No domain descriptor is known for the requested type.
    #[error("unsupported range type: {name}")]
    UnsupportedDomain { name: String },

    #[error("target interval must be constant across the group")]
    TargetNotConstant,

    /// A discrete-domain bound that needs the next value of the domain maximum.
    #[error("bound {bound} is out of range: the domain has no next value")]
    OutOfRange { bound: String },

    #[error("lower bound {lower} must be less than or equal to upper bound {upper}")]
    InvertedBounds { lower: String, upper: String },

    #[error("malformed range literal {input:?}: {reason}")]
    InvalidLiteral { input: String, reason: String },
}

impl CoverageError {
    pub(crate) fn invalid_literal(input: &str, reason: impl Into<String>) -> Self {
        CoverageError::InvalidLiteral {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error is a broken input-order contract.
    pub fn is_unsorted(&self) -> bool {
        matches!(self, CoverageError::UnsortedInput { .. })
    }
}
