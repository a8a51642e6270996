//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Project brief is required: {0}")]
    InvalidBrief(String),

    #[error("Round count must be between {min} and {max}, got {got}")]
    InvalidRounds { got: u8, min: u8, max: u8 },

    #[error("Panel has no workers")]
    EmptyPanel,

    #[error("Invalid document update: {0}")]
    InvalidUpdate(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
