//! The knowledge base: catalogue plus training log

use super::training::{TrainingExample, TrainingLog, TrainingSnapshot};
use crate::catalogue::{DiseaseCatalogue, DiseaseProfile};
use crate::core::error::DomainError;

/// Owns the fixed disease catalogue and the growing training log.
///
/// The catalogue has no mutation API. The log only grows, and only through
/// [`KnowledgeBase::record`]. Share it behind an `Arc`; every method takes
/// `&self`.
#[derive(Debug)]
pub struct KnowledgeBase {
    catalogue: DiseaseCatalogue,
    log: TrainingLog,
}

impl KnowledgeBase {
    pub fn new(catalogue: DiseaseCatalogue) -> Self {
        Self {
            catalogue,
            log: TrainingLog::new(),
        }
    }

    /// Create a knowledge base whose log starts with `examples`, in order
    pub fn with_examples(
        catalogue: DiseaseCatalogue,
        examples: impl IntoIterator<Item = TrainingExample>,
    ) -> Self {
        let kb = Self::new(catalogue);
        for example in examples {
            kb.record(example);
        }
        kb
    }

    pub fn catalogue(&self) -> &DiseaseCatalogue {
        &self.catalogue
    }

    pub fn lookup(&self, disease: &str) -> Result<&DiseaseProfile, DomainError> {
        self.catalogue.lookup(disease)
    }

    /// Append a training example.
    ///
    /// Never rejects on content: unknown symptoms and labels outside the
    /// catalogue are recorded as-is. Returns the example's position in the
    /// log.
    pub fn record(&self, example: TrainingExample) -> usize {
        self.log.append(example)
    }

    /// Every recorded example, in insertion order
    pub fn all_examples(&self) -> TrainingSnapshot {
        self.log.snapshot()
    }

    pub fn example_count(&self) -> usize {
        self.log.len()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(DiseaseCatalogue::standard())
    }
}
