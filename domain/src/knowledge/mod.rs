//! Knowledge base
//!
//! Couples the immutable [`DiseaseCatalogue`](crate::catalogue::DiseaseCatalogue)
//! with the append-only training log the statistical classifier learns from.

pub mod base;
pub mod seed;
pub mod training;

pub use base::KnowledgeBase;
pub use seed::seed_corpus;
pub use training::{TrainingExample, TrainingLog, TrainingSnapshot};
