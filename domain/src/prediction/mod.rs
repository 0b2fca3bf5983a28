//! Prediction value objects

use serde::{Deserialize, Serialize};

/// Label returned when no symptoms were reported
pub const HEALTHY: &str = "Healthy";

/// Label returned when nothing in the catalogue matched
pub const UNKNOWN: &str = "Unknown";

/// Which path produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// Empty input short-circuit
    NoSymptoms,
    /// Learned classifier posterior
    Statistical,
    /// Exact-match overlap scoring
    RuleExact,
    /// Substring overlap scoring (dampened)
    RulePartial,
    /// No profile matched at all
    NoMatch,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSource::NoSymptoms => "no_symptoms",
            PredictionSource::Statistical => "statistical",
            PredictionSource::RuleExact => "rule_exact",
            PredictionSource::RulePartial => "rule_partial",
            PredictionSource::NoMatch => "no_match",
        }
    }

    pub fn is_rule_based(&self) -> bool {
        matches!(
            self,
            PredictionSource::RuleExact | PredictionSource::RulePartial | PredictionSource::NoMatch
        )
    }
}

impl std::fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A disease suggestion with its confidence.
///
/// # Example
///
/// ```
/// use triage_domain::prediction::{PredictionResult, PredictionSource};
///
/// let result = PredictionResult::new("Flu", 1.7, PredictionSource::RuleExact);
/// assert_eq!(result.confidence, 1.0);
/// assert!(PredictionResult::healthy().is_healthy());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Catalogue name, [`HEALTHY`], or [`UNKNOWN`]
    pub disease: String,
    /// Always within `[0.0, 1.0]`
    pub confidence: f64,
    pub source: PredictionSource,
}

impl PredictionResult {
    /// Create a result, clamping the confidence into `[0, 1]`
    pub fn new(disease: impl Into<String>, confidence: f64, source: PredictionSource) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            disease: disease.into(),
            confidence,
            source,
        }
    }

    pub fn healthy() -> Self {
        Self::new(HEALTHY, 1.0, PredictionSource::NoSymptoms)
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN, 0.0, PredictionSource::NoMatch)
    }

    pub fn is_healthy(&self) -> bool {
        self.disease == HEALTHY
    }

    pub fn is_unknown(&self) -> bool {
        self.disease == UNKNOWN
    }

    /// Confidence as a whole percentage (e.g. `0.756` -> `76`)
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round() as u8
    }
}
