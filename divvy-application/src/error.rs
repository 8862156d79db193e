use divvy_domain::Money;
use thiserror::Error;

/// Failure raised by a collaborator port.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("unknown group: {0}")]
    UnknownGroup(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// Rejection of an expense snapshot at the engine boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExpenseValidationError {
    #[error("expense {index} has a negative amount ({amount})")]
    NegativeAmount { index: usize, amount: Money },
    #[error("expense {index} has a negative share of {share} for {participant}")]
    NegativeShare {
        index: usize,
        participant: String,
        share: Money,
    },
    #[error(
        "expense {index} shares sum to {share_total} but {amount} was paid (tolerance {tolerance})"
    )]
    ShareSumMismatch {
        index: usize,
        amount: Money,
        share_total: Money,
        tolerance: Money,
    },
}

/// Coarse triage of a processing failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The supplied expense data is malformed.
    UserInput,
    /// A collaborator port failed.
    Upstream,
}

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error(transparent)]
    Validation(#[from] ExpenseValidationError),
    #[error("failed to load expenses: {0}")]
    Source(#[source] PortError),
    #[error("failed to store settlements: {0}")]
    Store(#[source] PortError),
}

impl ProcessingError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProcessingError::Validation(_) => FailureKind::UserInput,
            ProcessingError::Source(_) | ProcessingError::Store(_) => FailureKind::Upstream,
        }
    }
}
