//! Rule failures.
//!
//! Every operation checks its preconditions before touching state, so a
//! returned `RuleError` always means "nothing changed".

use thiserror::Error;

/// Why a combat operation was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Not enough Stones, charges, or available actions.
    #[error("{0}")]
    InsufficientResource(String),

    /// The operation would break a combat invariant.
    #[error("{0}")]
    InvariantViolation(String),

    /// A referenced buff or combat-state substructure does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl RuleError {
    pub(crate) fn insufficient(message: impl Into<String>) -> Self {
        RuleError::InsufficientResource(message.into())
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        RuleError::InvariantViolation(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        RuleError::NotFound(message.into())
    }

    /// Short name of the failure category.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RuleError::InsufficientResource(_) => "insufficient_resource",
            RuleError::InvariantViolation(_) => "invariant_violation",
            RuleError::NotFound(_) => "not_found",
        }
    }
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
