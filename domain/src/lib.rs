//! Domain layer for symptom-triage
//!
//! This crate contains the disease catalogue, the training log, and both
//! classification strategies. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Knowledge Base
//!
//! A fixed catalogue of disease profiles (symptoms + prior weight) and an
//! append-only log of labelled training examples.
//!
//! ## Classification
//!
//! - **Statistical**: TF-IDF features with multinomial Naive Bayes, rebuilt
//!   from the training log on demand
//! - **Rule-based**: deterministic symptom-overlap scoring against the
//!   catalogue, always available
//! - **Hybrid**: [`HybridArbiter`] trusts a confident model and falls back
//!   to the rules otherwise

pub mod arbiter;
pub mod catalogue;
pub mod classifier;
pub mod core;
pub mod knowledge;
pub mod prediction;
pub mod scoring;
pub mod symptom;

// Re-export commonly used types
pub use arbiter::{Arbitration, FallbackReason, HybridArbiter};
pub use catalogue::{DiseaseCatalogue, DiseaseProfile};
pub use classifier::{
    LiveModel, ModelTrainer, PublishedModel, StatisticalClassifier, TrainedModel, TrainerSettings,
};
pub use crate::core::error::DomainError;
pub use knowledge::{KnowledgeBase, TrainingExample, TrainingSnapshot, seed_corpus};
pub use prediction::{HEALTHY, PredictionResult, PredictionSource, UNKNOWN};
pub use scoring::{RuleBasedScorer, RuleCandidate, RuleThresholds};
pub use symptom::{Symptom, SymptomSet, SymptomToken};
