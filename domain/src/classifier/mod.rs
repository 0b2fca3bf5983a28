//! Statistical disease classification
//!
//! # Architecture
//!
//! ```text
//! TrainingSnapshot ──► ModelTrainer ──► TrainedModel ──► LiveModel ◄── predict()
//!                      (FeatureSpace +   (immutable)      (Arc swap)
//!                       MultinomialNb)
//! ```
//!
//! - [`features`] — TF-IDF bag-of-symptoms vectors
//! - [`naive_bayes`] — multinomial Naive Bayes parameters and posteriors
//! - [`model`] — the trained artifact and the deterministic trainer
//! - [`slot`] — the single live model with atomic publish
//! - [`statistical`] — trainer and live model bundled behind one API

pub mod features;
pub mod model;
pub mod naive_bayes;
pub mod slot;
pub mod statistical;

pub use model::{ModelTrainer, TrainedModel, TrainerSettings};
pub use slot::{LiveModel, PublishedModel};
pub use statistical::StatisticalClassifier;
