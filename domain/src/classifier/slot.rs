//! The single live model shared by all predictors.

use super::model::TrainedModel;
use crate::core::error::DomainError;
use crate::core::sync;
use crate::symptom::SymptomSet;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct Published {
    model: Option<Arc<TrainedModel>>,
    generation: u64,
}

/// A model together with the generation it was published as
#[derive(Debug, Clone)]
pub struct PublishedModel {
    pub model: Arc<TrainedModel>,
    pub generation: u64,
}

/// Holder of the currently published [`TrainedModel`].
///
/// Readers clone the `Arc` under a brief read lock and then predict without
/// any lock held. A new model is fully built before [`LiveModel::publish`]
/// swaps it in with a single assignment, so a reader sees either the old
/// model or the new one, never a mix.
#[derive(Debug, Default)]
pub struct LiveModel {
    slot: RwLock<Published>,
}

impl LiveModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current model, if one has been published
    pub fn current(&self) -> Option<Arc<TrainedModel>> {
        sync::read(&self.slot).model.clone()
    }

    /// Number of models published so far
    pub fn generation(&self) -> u64 {
        sync::read(&self.slot).generation
    }

    pub fn is_trained(&self) -> bool {
        sync::read(&self.slot).model.is_some()
    }

    /// Replace the live model, returning a handle to the one just published
    /// and the generation it was assigned under the same lock
    pub fn publish(&self, model: TrainedModel) -> PublishedModel {
        let model = Arc::new(model);
        let mut slot = sync::write(&self.slot);
        slot.generation += 1;
        slot.model = Some(Arc::clone(&model));
        PublishedModel {
            model,
            generation: slot.generation,
        }
    }

    /// Predict with the live model.
    ///
    /// Fails with [`DomainError::ModelNotTrained`] when nothing has been
    /// published yet.
    pub fn predict(&self, symptoms: &SymptomSet) -> Result<(String, f64), DomainError> {
        let model = self
            .current()
            .ok_or_else(|| DomainError::ModelNotTrained("no model has been published".to_string()))?;
        model.predict(symptoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::DiseaseCatalogue;
    use crate::classifier::model::ModelTrainer;
    use crate::knowledge::{KnowledgeBase, seed_corpus};

    fn trained() -> TrainedModel {
        let kb = KnowledgeBase::with_examples(DiseaseCatalogue::standard(), seed_corpus());
        ModelTrainer::default().fit(&kb.all_examples()).unwrap()
    }

    #[test]
    fn test_empty_slot_is_not_trained() {
        let live = LiveModel::new();
        assert!(!live.is_trained());
        let err = live
            .predict(&SymptomSet::from_tokens(["fever"]))
            .unwrap_err();
        assert!(err.is_model_not_trained());
    }

    #[test]
    fn test_publish_replaces_and_counts() {
        let live = LiveModel::new();
        let first = live.publish(trained());
        assert_eq!(first.generation, 1);
        assert_eq!(live.generation(), 1);

        let second = live.publish(trained());
        assert_eq!(second.generation, 2);
        assert_eq!(live.generation(), 2);
        assert!(!Arc::ptr_eq(&first.model, &second.model));
        assert!(Arc::ptr_eq(&second.model, &live.current().unwrap()));
    }

    #[test]
    fn test_concurrent_publishes_report_distinct_generations() {
        let live = Arc::new(LiveModel::new());
        let model = trained();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let live = Arc::clone(&live);
                let model = model.clone();
                std::thread::spawn(move || live.publish(model).generation)
            })
            .collect();

        let mut generations: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        generations.sort_unstable();
        assert_eq!(generations, (1..=8).collect::<Vec<u64>>());
        assert_eq!(live.generation(), 8);
    }

    #[test]
    fn test_readers_keep_their_snapshot() {
        let live = LiveModel::new();
        live.publish(trained());
        let held = live.current().unwrap();
        live.publish(trained());
        // The reader's Arc still points at the first model
        assert!(!Arc::ptr_eq(&held, &live.current().unwrap()));
        assert_eq!(held.trained_on, 21);
    }
}
