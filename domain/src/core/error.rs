//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Statistical model is not trained: {0}")]
    ModelNotTrained(String),

    #[error("Disease not found in catalogue: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid catalogue: {0}")]
    InvalidCatalogue(String),

    #[error("None of the symptoms are known to the statistical model")]
    NoKnownSymptoms,

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }

    /// Check if the statistical path should fall back to rule-based scoring
    pub fn is_model_not_trained(&self) -> bool {
        matches!(self, DomainError::ModelNotTrained(_))
    }

    pub fn is_no_known_symptoms(&self) -> bool {
        matches!(self, DomainError::NoKnownSymptoms)
    }
}
