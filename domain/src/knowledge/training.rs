//! Training examples and the append-only training log

use crate::core::sync;
use crate::prediction::PredictionResult;
use crate::symptom::SymptomSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// A labelled symptom set, either confirmed by staff or taken from an
/// accepted prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub symptoms: SymptomSet,
    pub disease: String,
    /// Confidence at the time the label was assigned, in `[0, 1]`
    pub confidence: f64,
    #[serde(default = "Utc::now")]
    pub recorded_at: DateTime<Utc>,
}

impl TrainingExample {
    pub fn new(symptoms: SymptomSet, disease: impl Into<String>, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            symptoms,
            disease: disease.into().trim().to_string(),
            confidence,
            recorded_at: Utc::now(),
        }
    }

    /// A fully trusted label (confidence 1.0)
    pub fn labelled(symptoms: SymptomSet, disease: impl Into<String>) -> Self {
        Self::new(symptoms, disease, 1.0)
    }

    /// Feed a prediction back as a training example
    pub fn from_prediction(symptoms: SymptomSet, prediction: &PredictionResult) -> Self {
        Self::new(symptoms, prediction.disease.clone(), prediction.confidence)
    }
}

/// Append-only, insertion-ordered log of training examples.
///
/// Appends take a short exclusive lock; readers take a snapshot of `Arc`
/// handles and iterate without holding the lock.
#[derive(Debug, Default)]
pub struct TrainingLog {
    entries: RwLock<Vec<Arc<TrainingExample>>>,
}

impl TrainingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an example, returning its zero-based position in the log
    pub fn append(&self, example: TrainingExample) -> usize {
        let mut entries = sync::write(&self.entries);
        entries.push(Arc::new(example));
        entries.len() - 1
    }

    pub fn len(&self) -> usize {
        sync::read(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        sync::read(&self.entries).is_empty()
    }

    /// Point-in-time view of the whole log
    pub fn snapshot(&self) -> TrainingSnapshot {
        TrainingSnapshot {
            entries: sync::read(&self.entries).clone(),
        }
    }
}

/// A frozen view of the training log.
///
/// Later appends to the log are not visible here, so iterating a snapshot
/// twice always yields the same sequence.
#[derive(Debug, Clone, Default)]
pub struct TrainingSnapshot {
    entries: Vec<Arc<TrainingExample>>,
}

impl TrainingSnapshot {
    pub fn iter(&self) -> impl Iterator<Item = &TrainingExample> {
        self.entries.iter().map(|entry| &**entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned copies of every example, in order
    pub fn to_vec(&self) -> Vec<TrainingExample> {
        self.iter().cloned().collect()
    }
}
