//! Model persistence port
//!
//! Loading and saving of [`TrainedModel`] snapshots. The engine only calls
//! this at startup, at shutdown, and on explicit retrain-and-persist
//! requests.

use async_trait::async_trait;
use thiserror::Error;
use triage_domain::TrainedModel;

/// Errors from a model store
#[derive(Error, Debug)]
pub enum ModelStoreError {
    #[error("No persisted model found")]
    NotFound,

    #[error("Model store I/O error: {0}")]
    Io(String),

    #[error("Invalid model snapshot: {0}")]
    Format(String),
}

impl ModelStoreError {
    /// A missing snapshot just means "train fresh"
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelStoreError::NotFound)
    }
}

/// Port for loading and saving trained models
///
/// A failed save must leave any previously saved snapshot intact.
#[async_trait]
pub trait ModelStore: Send + Sync {
    async fn load(&self) -> Result<TrainedModel, ModelStoreError>;

    async fn save(&self, model: &TrainedModel) -> Result<(), ModelStoreError>;

    /// Where snapshots live, for display
    fn location(&self) -> String;
}

/// Store that never has a snapshot and discards saves
pub struct NoModelStore;

#[async_trait]
impl ModelStore for NoModelStore {
    async fn load(&self) -> Result<TrainedModel, ModelStoreError> {
        Err(ModelStoreError::NotFound)
    }

    async fn save(&self, _model: &TrainedModel) -> Result<(), ModelStoreError> {
        Ok(())
    }

    fn location(&self) -> String {
        "(none)".to_string()
    }
}
