//! Model lifecycle use case
//!
//! Startup and shutdown around the long-lived engine state:
//!
//! 1. **Bootstrap** replays the training journal into the knowledge base,
//!    falling back to the built-in seed corpus when the journal is empty.
//! 2. It then restores the persisted model snapshot. A missing or invalid
//!    snapshot is not fatal: the model is fitted fresh from the log.
//! 3. **Save** writes the live model back through the store.

use crate::ports::model_store::{ModelStore, ModelStoreError};
use crate::ports::training_journal::TrainingJournal;
use crate::state::EngineState;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use triage_domain::seed_corpus;

/// Where the live model came from at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    /// Restored from the persisted snapshot
    Snapshot,
    /// Fitted from the training log
    Trained,
    /// No snapshot and not enough data; predictions use the rules only
    Untrained,
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelSource::Snapshot => "snapshot",
            ModelSource::Trained => "trained",
            ModelSource::Untrained => "untrained",
        };
        write!(f, "{}", s)
    }
}

/// Summary of a bootstrap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapReport {
    /// Examples replayed from the journal
    pub examples_loaded: usize,
    /// Seed examples added to the log
    pub seeded: usize,
    pub model_source: ModelSource,
}

/// Use case for loading and saving engine state
pub struct ModelLifecycleUseCase {
    state: EngineState,
    store: Arc<dyn ModelStore>,
    journal: Arc<dyn TrainingJournal>,
    always_seed: bool,
}

impl ModelLifecycleUseCase {
    pub fn new(
        state: EngineState,
        store: Arc<dyn ModelStore>,
        journal: Arc<dyn TrainingJournal>,
    ) -> Self {
        Self {
            state,
            store,
            journal,
            always_seed: false,
        }
    }

    /// Load the seed corpus even when the journal is non-empty
    pub fn with_always_seed(mut self, always: bool) -> Self {
        self.always_seed = always;
        self
    }

    /// Fill the training log and make a model live if possible.
    ///
    /// Never fails: every problem degrades to a smaller starting state and
    /// is logged.
    pub async fn bootstrap(&self) -> BootstrapReport {
        let journaled = match self.journal.load_all() {
            Ok(examples) => examples,
            Err(e) => {
                warn!("Failed to read training journal: {}", e);
                Vec::new()
            }
        };

        let seeded = if journaled.is_empty() || self.always_seed {
            let seed = seed_corpus();
            let count = seed.len();
            for example in seed {
                self.state.knowledge.record(example);
            }
            debug!("Loaded {} seed examples", count);
            count
        } else {
            0
        };

        let examples_loaded = journaled.len();
        for example in journaled {
            self.state.knowledge.record(example);
        }

        let model_source = self.restore_or_train().await;

        info!(
            "Engine ready: {} journaled + {} seed examples, model {}",
            examples_loaded, seeded, model_source
        );

        BootstrapReport {
            examples_loaded,
            seeded,
            model_source,
        }
    }

    async fn restore_or_train(&self) -> ModelSource {
        match self.store.load().await {
            Ok(model) => match self.state.classifier.install(model) {
                Ok(()) => {
                    debug!("Restored model from {}", self.store.location());
                    return ModelSource::Snapshot;
                }
                Err(e) => warn!(
                    "Ignoring inconsistent model snapshot at {}: {}",
                    self.store.location(),
                    e
                ),
            },
            Err(ModelStoreError::NotFound) => {
                debug!("No model snapshot at {}", self.store.location());
            }
            Err(e) => warn!("Failed to load model snapshot: {}", e),
        }

        match self.state.classifier.retrain(&self.state.knowledge) {
            Ok(_) => ModelSource::Trained,
            Err(e) => {
                info!("Statistical model unavailable: {}", e);
                ModelSource::Untrained
            }
        }
    }

    /// Persist the live model. Succeeds trivially when there is none.
    pub async fn save(&self) -> Result<bool, ModelStoreError> {
        let Some(model) = self.state.classifier.current() else {
            debug!("No live model to save");
            return Ok(false);
        };
        self.store.save(&model).await?;
        info!("Saved model to {}", self.store.location());
        Ok(true)
    }
}
