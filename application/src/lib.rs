//! Application layer for symptom-triage
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod engine;
pub mod ports;
pub mod state;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{EngineInfo, TriageEngine};
pub use ports::{
    model_store::{ModelStore, ModelStoreError, NoModelStore},
    progress::{NoRetrainProgress, RetrainProgress},
    training_journal::{JournalError, NoTrainingJournal, TrainingJournal},
};
pub use state::EngineState;
pub use use_cases::model_lifecycle::{BootstrapReport, ModelLifecycleUseCase, ModelSource};
pub use use_cases::predict_disease::{PredictDiseaseUseCase, PredictionExplanation};
pub use use_cases::retrain_model::{
    RetrainInput, RetrainModelError, RetrainModelUseCase, RetrainOutput,
};
pub use use_cases::submit_training_example::{
    SubmitOutput, SubmitTrainingExampleUseCase, SubmitTrainingInput,
};
