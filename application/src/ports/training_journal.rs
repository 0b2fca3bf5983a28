//! Port for the durable copy of the training log.
//!
//! The in-memory [`KnowledgeBase`](triage_domain::KnowledgeBase) log is the
//! source of truth during a session; the journal lets it survive restarts.
//! Append failures are reported but never stop a submission from being
//! recorded in memory.

use thiserror::Error;
use triage_domain::TrainingExample;

/// Errors from a training journal
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Training journal I/O error: {0}")]
    Io(String),

    #[error("Training journal encoding error: {0}")]
    Encoding(String),
}

/// Append-only storage for training examples
pub trait TrainingJournal: Send + Sync {
    /// Durably append one example.
    fn append(&self, example: &TrainingExample) -> Result<(), JournalError>;

    /// Every stored example, oldest first.
    fn load_all(&self) -> Result<Vec<TrainingExample>, JournalError>;
}

/// No-op journal for tests and when persistence is disabled
pub struct NoTrainingJournal;

impl TrainingJournal for NoTrainingJournal {
    fn append(&self, _example: &TrainingExample) -> Result<(), JournalError> {
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TrainingExample>, JournalError> {
        Ok(Vec::new())
    }
}
