//! Trained model snapshots and the trainer that builds them

use super::features::FeatureSpace;
use super::naive_bayes::MultinomialNb;
use crate::core::error::DomainError;
use crate::knowledge::{TrainingExample, TrainingSnapshot};
use crate::prediction::UNKNOWN;
use crate::symptom::SymptomSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything needed to classify a symptom set: feature vocabulary plus
/// classifier parameters.
///
/// Immutable once built. Published to readers behind an `Arc` by
/// [`LiveModel`](super::slot::LiveModel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    features: FeatureSpace,
    classifier: MultinomialNb,
    /// Number of examples the model was fitted on
    pub trained_on: usize,
    pub trained_at: DateTime<Utc>,
}

impl TrainedModel {
    /// Most probable disease and its posterior probability.
    ///
    /// Fails with [`DomainError::NoKnownSymptoms`] when no symptom is in the
    /// vocabulary, since the posterior would be the class prior alone.
    pub fn predict(&self, symptoms: &SymptomSet) -> Result<(String, f64), DomainError> {
        let vector = self.features.transform(symptoms);
        if vector.is_empty() {
            return Err(DomainError::NoKnownSymptoms);
        }
        let (disease, confidence) = self.classifier.predict(&vector);
        Ok((disease.to_string(), confidence))
    }

    /// Posterior for every class, highest first. Empty when no symptom is
    /// in the vocabulary.
    pub fn rank(&self, symptoms: &SymptomSet) -> Vec<(String, f64)> {
        let vector = self.features.transform(symptoms);
        if vector.is_empty() {
            return Vec::new();
        }
        let mut ranked: Vec<(String, f64)> = self
            .classifier
            .classes()
            .iter()
            .cloned()
            .zip(self.classifier.predict_proba(&vector))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Disease labels the model can produce
    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    pub fn vocabulary(&self) -> &[String] {
        self.features.terms()
    }

    /// Whether two models carry identical parameters (ignores timestamps)
    pub fn same_parameters(&self, other: &TrainedModel) -> bool {
        self.features == other.features
            && self.classifier == other.classifier
            && self.trained_on == other.trained_on
    }

    /// Validate a model that came from outside the process (e.g. a
    /// persisted snapshot).
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.features.is_consistent() {
            return Err(DomainError::InvalidInput(
                "model feature space is inconsistent".to_string(),
            ));
        }
        if !self.classifier.is_consistent(self.features.dimensions()) {
            return Err(DomainError::InvalidInput(
                "model classifier parameters are inconsistent".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for [`ModelTrainer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainerSettings {
    /// Additive (Laplace) smoothing
    pub alpha: f64,
    /// Fewer usable examples than this means no model
    pub min_examples: usize,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            min_examples: 3,
        }
    }
}

/// Builds [`TrainedModel`]s from the training log.
///
/// Training is deterministic: the same examples in the same order always
/// produce the same parameters. Examples with no symptoms, or labelled
/// with nothing or `"Unknown"`, carry no disease signal and are skipped.
#[derive(Debug, Clone, Default)]
pub struct ModelTrainer {
    settings: TrainerSettings,
}

impl ModelTrainer {
    pub fn new(settings: TrainerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    /// Whether an example contributes to fitting
    pub fn is_usable(example: &TrainingExample) -> bool {
        !example.symptoms.is_empty()
            && !example.disease.is_empty()
            && !example.disease.eq_ignore_ascii_case(UNKNOWN)
    }

    pub fn fit(&self, examples: &TrainingSnapshot) -> Result<TrainedModel, DomainError> {
        self.fit_interruptible(examples, &|| false)
    }

    /// Fit a model, polling `interrupt` between examples.
    ///
    /// Fails with [`DomainError::ModelNotTrained`] when there are too few
    /// usable examples or fewer than two distinct labels, and with
    /// [`DomainError::Cancelled`] when interrupted.
    pub fn fit_interruptible(
        &self,
        examples: &TrainingSnapshot,
        interrupt: &dyn Fn() -> bool,
    ) -> Result<TrainedModel, DomainError> {
        if !(self.settings.alpha > 0.0 && self.settings.alpha.is_finite()) {
            return Err(DomainError::InvalidInput(format!(
                "smoothing alpha must be positive, got {}",
                self.settings.alpha
            )));
        }

        let usable: Vec<&TrainingExample> =
            examples.iter().filter(|e| Self::is_usable(e)).collect();

        let required = self.settings.min_examples.max(1);
        if usable.len() < required {
            return Err(DomainError::ModelNotTrained(format!(
                "{} usable training examples, need at least {}",
                usable.len(),
                required
            )));
        }

        let mut classes: Vec<String> = usable.iter().map(|e| e.disease.clone()).collect();
        classes.sort();
        classes.dedup();
        if classes.len() < 2 {
            return Err(DomainError::ModelNotTrained(
                "training examples cover fewer than two diseases".to_string(),
            ));
        }

        let features = FeatureSpace::fit(usable.iter().map(|e| &e.symptoms));

        let mut samples = Vec::with_capacity(usable.len());
        for example in &usable {
            if interrupt() {
                return Err(DomainError::Cancelled);
            }
            let class = classes
                .binary_search(&example.disease)
                .map_err(|_| DomainError::InvalidInput(example.disease.clone()))?;
            samples.push((features.transform(&example.symptoms), class));
        }

        let classifier = MultinomialNb::fit(
            classes,
            features.dimensions(),
            &samples,
            self.settings.alpha,
            interrupt,
        )?;

        Ok(TrainedModel {
            features,
            classifier,
            trained_on: usable.len(),
            trained_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::DiseaseCatalogue;
    use crate::knowledge::{KnowledgeBase, seed_corpus};

    fn seeded() -> KnowledgeBase {
        KnowledgeBase::with_examples(DiseaseCatalogue::standard(), seed_corpus())
    }

    fn set(tokens: &[&str]) -> SymptomSet {
        SymptomSet::from_tokens(tokens)
    }

    #[test]
    fn test_fit_on_seed_corpus() {
        let model = ModelTrainer::default().fit(&seeded().all_examples()).unwrap();
        assert_eq!(model.trained_on, 21);
        assert_eq!(model.classes().len(), 8);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_seed_model_recognises_training_patterns() {
        let model = ModelTrainer::default().fit(&seeded().all_examples()).unwrap();
        let (disease, confidence) = model.predict(&set(&["nausea", "vomiting", "diarrhea"])).unwrap();
        assert_eq!(disease, "Stomach Flu");
        assert!(confidence > 0.3);

        let (disease, _) = model.predict(&set(&["headache", "dizziness"])).unwrap();
        assert_eq!(disease, "Migraine");
    }

    #[test]
    fn test_too_few_examples_is_not_trained() {
        let kb = KnowledgeBase::default();
        kb.record(TrainingExample::labelled(set(&["fever"]), "Flu"));
        kb.record(TrainingExample::labelled(set(&["rash"]), "Chickenpox"));

        let err = ModelTrainer::default().fit(&kb.all_examples()).unwrap_err();
        assert!(err.is_model_not_trained());
    }

    #[test]
    fn test_single_class_is_not_trained() {
        let kb = KnowledgeBase::default();
        for _ in 0..5 {
            kb.record(TrainingExample::labelled(set(&["fever"]), "Flu"));
        }
        let err = ModelTrainer::default().fit(&kb.all_examples()).unwrap_err();
        assert!(err.is_model_not_trained());
    }

    #[test]
    fn test_unusable_examples_are_skipped() {
        let kb = seeded();
        kb.record(TrainingExample::labelled(SymptomSet::new(), "Healthy"));
        kb.record(TrainingExample::new(set(&["zzz"]), "Unknown", 0.0));

        let model = ModelTrainer::default().fit(&kb.all_examples()).unwrap();
        assert_eq!(model.trained_on, 21);
        assert!(!model.classes().iter().any(|c| c == "Unknown" || c == "Healthy"));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let kb = seeded();
        let trainer = ModelTrainer::default();
        let a = trainer.fit(&kb.all_examples()).unwrap();
        let b = trainer.fit(&kb.all_examples()).unwrap();
        assert!(a.same_parameters(&b));
    }

    #[test]
    fn test_interrupt_returns_cancelled() {
        let err = ModelTrainer::default()
            .fit_interruptible(&seeded().all_examples(), &|| true)
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_rejects_non_positive_alpha() {
        let trainer = ModelTrainer::new(TrainerSettings {
            alpha: 0.0,
            ..TrainerSettings::default()
        });
        assert!(matches!(
            trainer.fit(&seeded().all_examples()),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rank_is_sorted() {
        let model = ModelTrainer::default().fit(&seeded().all_examples()).unwrap();
        let ranked = model.rank(&set(&["rash", "fever"]));
        assert_eq!(ranked.len(), 8);
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(ranked[0].0, model.predict(&set(&["rash", "fever"])).unwrap().0);
    }

    #[test]
    fn test_out_of_vocabulary_input_has_no_posterior() {
        let model = ModelTrainer::default().fit(&seeded().all_examples()).unwrap();
        let input = set(&["zzz_unmatched_token"]);
        assert_eq!(model.predict(&input), Err(DomainError::NoKnownSymptoms));
        assert!(model.rank(&input).is_empty());
    }

    #[test]
    fn test_snapshot_round_trip_keeps_parameters() {
        let model = ModelTrainer::default().fit(&seeded().all_examples()).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let restored: TrainedModel = serde_json::from_str(&json).unwrap();
        assert!(restored.validate().is_ok());
        assert_eq!(restored.classes(), model.classes());
        assert_eq!(restored.vocabulary(), model.vocabulary());

        let input = set(&["fever", "cough"]);
        let (a, pa) = model.predict(&input).unwrap();
        let (b, pb) = restored.predict(&input).unwrap();
        assert_eq!(a, b);
        assert!((pa - pb).abs() < 1e-9);
    }
}
