//! Hybrid arbitration between the statistical classifier and the
//! rule-based scorer.
//!
//! Policy:
//!
//! 1. No symptoms ⇒ `Healthy` with confidence 1.0, neither strategy runs.
//! 2. Ask the statistical classifier.
//! 3. Not trained, no symptom in the model's vocabulary, or confidence
//!    below the fallback threshold ⇒ the rule-based result.
//! 4. Otherwise the statistical result.
//!
//! Recording the outcome as a training example is left to the caller.

use crate::classifier::StatisticalClassifier;
use crate::core::error::DomainError;
use crate::knowledge::KnowledgeBase;
use crate::prediction::{PredictionResult, PredictionSource};
use crate::scoring::RuleBasedScorer;
use crate::symptom::SymptomSet;
use serde::{Deserialize, Serialize};

/// Why the arbiter used the rule-based result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No model has been published
    ModelNotTrained,
    /// None of the symptoms appear in the model's vocabulary
    NoKnownSymptoms,
    /// The model answered, but below the threshold
    LowConfidence { disease: String, confidence: f64 },
}

/// Outcome of one arbitration, with enough detail to explain it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arbitration {
    pub result: PredictionResult,
    pub fallback: Option<FallbackReason>,
}

impl Arbitration {
    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// The hybrid decision policy
#[derive(Debug, Clone)]
pub struct HybridArbiter {
    fallback_threshold: f64,
    scorer: RuleBasedScorer,
}

impl HybridArbiter {
    pub fn new(fallback_threshold: f64, scorer: RuleBasedScorer) -> Self {
        Self {
            fallback_threshold,
            scorer,
        }
    }

    pub fn fallback_threshold(&self) -> f64 {
        self.fallback_threshold
    }

    pub fn scorer(&self) -> &RuleBasedScorer {
        &self.scorer
    }

    pub fn decide(
        &self,
        kb: &KnowledgeBase,
        classifier: &StatisticalClassifier,
        symptoms: &SymptomSet,
    ) -> Arbitration {
        if symptoms.is_empty() {
            return Arbitration {
                result: PredictionResult::healthy(),
                fallback: None,
            };
        }

        let reason = match classifier.predict(symptoms) {
            Ok((disease, confidence)) if confidence >= self.fallback_threshold => {
                return Arbitration {
                    result: PredictionResult::new(disease, confidence, PredictionSource::Statistical),
                    fallback: None,
                };
            }
            Ok((disease, confidence)) => FallbackReason::LowConfidence {
                disease,
                confidence,
            },
            Err(DomainError::NoKnownSymptoms) => FallbackReason::NoKnownSymptoms,
            Err(_) => FallbackReason::ModelNotTrained,
        };

        Arbitration {
            result: self.scorer.score(kb.catalogue(), symptoms),
            fallback: Some(reason),
        }
    }
}

impl Default for HybridArbiter {
    fn default() -> Self {
        Self::new(0.3, RuleBasedScorer::default())
    }
}
