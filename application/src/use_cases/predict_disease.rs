//! Predict Disease use case
//!
//! The single prediction entry point. Delegates the decision to the
//! domain [`HybridArbiter`] and logs how it was reached.

use crate::state::EngineState;
use serde::Serialize;
use tracing::debug;
use triage_domain::{
    Arbitration, FallbackReason, HybridArbiter, PredictionResult, RuleCandidate, SymptomSet,
};

/// A prediction together with what each strategy thought
#[derive(Debug, Clone, Serialize)]
pub struct PredictionExplanation {
    pub arbitration: Arbitration,
    /// Exact-match rule scores, best first
    pub rule_candidates: Vec<RuleCandidate>,
    /// Model posteriors, best first (empty when untrained)
    pub model_ranking: Vec<(String, f64)>,
}

/// Use case for predicting a disease from a symptom set
pub struct PredictDiseaseUseCase {
    state: EngineState,
    arbiter: HybridArbiter,
}

impl PredictDiseaseUseCase {
    pub fn new(state: EngineState, arbiter: HybridArbiter) -> Self {
        Self { state, arbiter }
    }

    pub fn execute(&self, symptoms: &SymptomSet) -> PredictionResult {
        self.decide(symptoms).result
    }

    /// Predict and keep the arbitration details
    pub fn decide(&self, symptoms: &SymptomSet) -> Arbitration {
        let outcome =
            self.arbiter
                .decide(&self.state.knowledge, &self.state.classifier, symptoms);

        match &outcome.fallback {
            None => debug!(
                "Predicted {} ({:.3}) via {} for {}",
                outcome.result.disease, outcome.result.confidence, outcome.result.source, symptoms
            ),
            Some(FallbackReason::ModelNotTrained) => debug!(
                "Model not trained; rule-based {} ({:.3}) for {}",
                outcome.result.disease, outcome.result.confidence, symptoms
            ),
            Some(FallbackReason::NoKnownSymptoms) => debug!(
                "No symptom known to the model; rule-based {} ({:.3}) for {}",
                outcome.result.disease, outcome.result.confidence, symptoms
            ),
            Some(FallbackReason::LowConfidence {
                disease,
                confidence,
            }) => debug!(
                "Model suggested {} at {:.3} (< {}); rule-based {} ({:.3}) for {}",
                disease,
                confidence,
                self.arbiter.fallback_threshold(),
                outcome.result.disease,
                outcome.result.confidence,
                symptoms
            ),
        }

        outcome
    }

    /// Predict and collect both strategies' full rankings
    pub fn explain(&self, symptoms: &SymptomSet) -> PredictionExplanation {
        let arbitration = self.decide(symptoms);
        let rule_candidates = self
            .arbiter
            .scorer()
            .rank_exact(self.state.knowledge.catalogue(), symptoms);
        let model_ranking = match self.state.classifier.current() {
            Some(model) if !symptoms.is_empty() => model.rank(symptoms),
            _ => Vec::new(),
        };

        PredictionExplanation {
            arbitration,
            rule_candidates,
            model_ranking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_domain::{PredictionSource, TrainingExample, seed_corpus};

    fn use_case(seed: bool) -> PredictDiseaseUseCase {
        let state = EngineState::default();
        if seed {
            for example in seed_corpus() {
                state.knowledge.record(example);
            }
            state.classifier.retrain(&state.knowledge).unwrap();
        }
        PredictDiseaseUseCase::new(state, HybridArbiter::default())
    }

    fn set(tokens: &[&str]) -> SymptomSet {
        SymptomSet::from_tokens(tokens)
    }

    #[test]
    fn test_empty_is_healthy_regardless_of_model() {
        assert_eq!(use_case(false).execute(&set(&[])), PredictionResult::healthy());
        assert_eq!(use_case(true).execute(&set(&[])), PredictionResult::healthy());
    }

    #[test]
    fn test_rule_scenarios_without_model() {
        let uc = use_case(false);

        let flu = uc.execute(&set(&["fever", "cough", "body_ache", "fatigue", "headache"]));
        assert_eq!(flu.disease, "Flu");
        assert!((flu.confidence - 0.9).abs() < 1e-9);

        let cold = uc.execute(&set(&["runny_nose", "cough"]));
        assert_eq!(cold.disease, "Common Cold");
        assert!((cold.confidence - 0.4).abs() < 1e-9);

        let migraine = uc.execute(&set(&["headache", "nausea", "dizziness"]));
        assert_eq!(migraine.disease, "Migraine");
        assert!((migraine.confidence - 0.75).abs() < 1e-9);

        assert_eq!(
            uc.execute(&set(&["zzz_unmatched_token"])),
            PredictionResult::unknown()
        );
    }

    #[test]
    fn test_trained_model_is_used_when_confident() {
        let uc = use_case(true);
        let result = uc.execute(&set(&["headache", "nausea", "dizziness"]));
        assert_eq!(result.disease, "Migraine");
        assert_eq!(result.source, PredictionSource::Statistical);
    }

    #[test]
    fn test_prediction_does_not_record() {
        let uc = use_case(true);
        let before = uc.state.knowledge.example_count();
        uc.execute(&set(&["fever"]));
        assert_eq!(uc.state.knowledge.example_count(), before);
    }

    #[test]
    fn test_explain_includes_both_rankings() {
        let uc = use_case(true);
        let explanation = uc.explain(&set(&["rash", "fever"]));
        assert!(!explanation.rule_candidates.is_empty());
        assert_eq!(explanation.model_ranking.len(), 8);

        let untrained = use_case(false).explain(&set(&["rash"]));
        assert!(untrained.model_ranking.is_empty());
        assert_eq!(
            untrained.arbitration.fallback,
            Some(FallbackReason::ModelNotTrained)
        );
    }

    #[test]
    fn test_explain_unknown_symptoms_has_no_model_ranking() {
        let explanation = use_case(true).explain(&set(&["zzz_unmatched_token"]));
        assert!(explanation.model_ranking.is_empty());
        assert_eq!(
            explanation.arbitration.fallback,
            Some(FallbackReason::NoKnownSymptoms)
        );
        assert_eq!(explanation.arbitration.result, PredictionResult::unknown());
    }

    #[test]
    fn test_recorded_feedback_shifts_model() {
        let uc = use_case(true);
        for _ in 0..10 {
            uc.state.knowledge.record(TrainingExample::labelled(
                set(&["rash", "fever"]),
                "Chickenpox",
            ));
        }
        uc.state.classifier.retrain(&uc.state.knowledge).unwrap();

        let result = uc.execute(&set(&["rash", "fever"]));
        assert_eq!(result.disease, "Chickenpox");
        assert_eq!(result.source, PredictionSource::Statistical);
    }
}
