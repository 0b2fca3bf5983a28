//! Statistical classifier: trainer plus live model

use super::model::{ModelTrainer, TrainedModel, TrainerSettings};
use super::slot::{LiveModel, PublishedModel};
use crate::core::error::DomainError;
use crate::knowledge::KnowledgeBase;
use crate::symptom::SymptomSet;
use std::sync::Arc;

/// Learns from the knowledge base's training log and answers predictions
/// from the currently published model.
#[derive(Debug, Default)]
pub struct StatisticalClassifier {
    trainer: ModelTrainer,
    live: LiveModel,
}

impl StatisticalClassifier {
    pub fn new(settings: TrainerSettings) -> Self {
        Self {
            trainer: ModelTrainer::new(settings),
            live: LiveModel::new(),
        }
    }

    /// Top class and its posterior from the live model
    pub fn predict(&self, symptoms: &SymptomSet) -> Result<(String, f64), DomainError> {
        self.live.predict(symptoms)
    }

    pub fn retrain(&self, kb: &KnowledgeBase) -> Result<PublishedModel, DomainError> {
        self.retrain_interruptible(kb, &|| false)
    }

    /// Rebuild from the full training log and publish the result.
    ///
    /// On any failure, including cancellation, the previously published
    /// model stays live.
    pub fn retrain_interruptible(
        &self,
        kb: &KnowledgeBase,
        interrupt: &dyn Fn() -> bool,
    ) -> Result<PublishedModel, DomainError> {
        let model = self
            .trainer
            .fit_interruptible(&kb.all_examples(), interrupt)?;
        Ok(self.live.publish(model))
    }

    /// Publish an externally built model (e.g. a loaded snapshot) after
    /// validating it
    pub fn install(&self, model: TrainedModel) -> Result<(), DomainError> {
        model.validate()?;
        self.live.publish(model);
        Ok(())
    }

    pub fn current(&self) -> Option<Arc<TrainedModel>> {
        self.live.current()
    }

    pub fn live(&self) -> &LiveModel {
        &self.live
    }

    pub fn settings(&self) -> &TrainerSettings {
        self.trainer.settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::DiseaseCatalogue;
    use crate::knowledge::{TrainingExample, seed_corpus};

    fn seeded() -> KnowledgeBase {
        KnowledgeBase::with_examples(DiseaseCatalogue::standard(), seed_corpus())
    }

    #[test]
    fn test_retrain_publishes() {
        let classifier = StatisticalClassifier::default();
        assert!(classifier.predict(&SymptomSet::from_tokens(["fever"])).is_err());

        classifier.retrain(&seeded()).unwrap();
        let (disease, _) = classifier
            .predict(&SymptomSet::from_tokens(["nausea", "vomiting"]))
            .unwrap();
        assert_eq!(disease, "Stomach Flu");
    }

    #[test]
    fn test_failed_retrain_keeps_previous_model() {
        let classifier = StatisticalClassifier::default();
        let kb = seeded();
        let first = classifier.retrain(&kb).unwrap().model;

        let err = classifier.retrain_interruptible(&kb, &|| true).unwrap_err();
        assert!(err.is_cancelled());
        assert!(Arc::ptr_eq(&first, &classifier.current().unwrap()));

        let empty = KnowledgeBase::default();
        assert!(classifier.retrain(&empty).is_err());
        assert!(Arc::ptr_eq(&first, &classifier.current().unwrap()));
    }

    #[test]
    fn test_retrain_is_idempotent() {
        let classifier = StatisticalClassifier::default();
        let kb = seeded();
        let a = classifier.retrain(&kb).unwrap();
        let b = classifier.retrain(&kb).unwrap();
        assert!(a.model.same_parameters(&b.model));
        assert_eq!((a.generation, b.generation), (1, 2));
        assert_eq!(classifier.live().generation(), 2);
    }

    #[test]
    fn test_retrain_sees_new_examples() {
        let classifier = StatisticalClassifier::default();
        let kb = seeded();
        let before = classifier.retrain(&kb).unwrap().model;
        kb.record(TrainingExample::labelled(
            SymptomSet::from_tokens(["rash", "itching"]),
            "Allergic Reaction",
        ));
        let after = classifier.retrain(&kb).unwrap().model;
        assert_eq!(after.trained_on, before.trained_on + 1);
        assert!(after.vocabulary().iter().any(|t| t == "itching"));
    }
}
