//! Process-wide engine state.
//!
//! Lifecycle: created empty at startup, filled by
//! [`ModelLifecycleUseCase::bootstrap`](crate::use_cases::model_lifecycle::ModelLifecycleUseCase::bootstrap)
//! from the journal (or seed corpus) and a persisted snapshot, mutated only
//! through training-log appends and retrains, and optionally saved on
//! shutdown. Use cases receive it by handle; there are no globals.

use std::sync::Arc;
use triage_domain::{DiseaseCatalogue, KnowledgeBase, StatisticalClassifier, TrainerSettings};

/// Shared handle to the knowledge base and the statistical classifier
#[derive(Debug, Clone)]
pub struct EngineState {
    pub knowledge: Arc<KnowledgeBase>,
    pub classifier: Arc<StatisticalClassifier>,
}

impl EngineState {
    pub fn new(catalogue: DiseaseCatalogue, trainer: TrainerSettings) -> Self {
        Self {
            knowledge: Arc::new(KnowledgeBase::new(catalogue)),
            classifier: Arc::new(StatisticalClassifier::new(trainer)),
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(DiseaseCatalogue::standard(), TrainerSettings::default())
    }
}
