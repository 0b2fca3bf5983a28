//! Deterministic overlap scoring against the catalogue.
//!
//! The scorer needs no training data and is always available. It runs in
//! two passes:
//!
//! 1. **Exact**: `min(1, matched / |profile| * weight)` for every profile
//!    with at least one verbatim symptom match.
//! 2. **Partial**: only when the best exact score is below
//!    [`RuleThresholds::partial_match_threshold`]. Counts profile symptoms
//!    that share a substring with an input token and scores
//!    `min(1, matched / max(|input|, |profile|) * weight * discount)`.
//!    A partial candidate replaces the exact best only if it is strictly
//!    higher.
//!
//! Ties at every stage keep the profile that comes first in catalogue order.

use crate::catalogue::{DiseaseCatalogue, DiseaseProfile};
use crate::prediction::{PredictionResult, PredictionSource};
use crate::symptom::SymptomSet;
use serde::{Deserialize, Serialize};

/// Tuning knobs for the rule-based scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Exact-match confidence below which the partial pass runs
    pub partial_match_threshold: f64,
    /// Multiplier applied to every partial-match score
    pub partial_match_discount: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            partial_match_threshold: 0.3,
            partial_match_discount: 0.7,
        }
    }
}

/// Exact-match score for a single profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleCandidate {
    pub disease: String,
    pub matched: usize,
    pub profile_size: usize,
    pub confidence: f64,
}

/// Rule-based fallback scorer
#[derive(Debug, Clone, Default)]
pub struct RuleBasedScorer {
    thresholds: RuleThresholds,
}

impl RuleBasedScorer {
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Score `input` against every profile in `catalogue`.
    pub fn score(&self, catalogue: &DiseaseCatalogue, input: &SymptomSet) -> PredictionResult {
        if input.is_empty() {
            return PredictionResult::healthy();
        }

        let mut best: Option<(&DiseaseProfile, f64, PredictionSource)> = None;

        for profile in catalogue.iter() {
            let matched = profile.exact_matches(input);
            if matched == 0 {
                continue;
            }
            let confidence = exact_confidence(profile, matched);
            if best.is_none_or(|(_, current, _)| confidence > current) {
                best = Some((profile, confidence, PredictionSource::RuleExact));
            }
        }

        let best_exact = best.map_or(0.0, |(_, confidence, _)| confidence);

        if best_exact < self.thresholds.partial_match_threshold {
            for profile in catalogue.iter() {
                let matched = profile.partial_matches(input);
                if matched == 0 {
                    continue;
                }
                let confidence = self.partial_confidence(profile, matched, input.len());
                if best.is_none_or(|(_, current, _)| confidence > current) {
                    best = Some((profile, confidence, PredictionSource::RulePartial));
                }
            }
        }

        match best {
            Some((profile, confidence, source)) => {
                PredictionResult::new(profile.name(), confidence, source)
            }
            None => PredictionResult::unknown(),
        }
    }

    /// Exact-match candidates for every profile with at least one match,
    /// highest confidence first (catalogue order among equals).
    pub fn rank_exact(
        &self,
        catalogue: &DiseaseCatalogue,
        input: &SymptomSet,
    ) -> Vec<RuleCandidate> {
        let mut candidates: Vec<RuleCandidate> = catalogue
            .iter()
            .filter_map(|profile| {
                let matched = profile.exact_matches(input);
                (matched > 0).then(|| RuleCandidate {
                    disease: profile.name().to_string(),
                    matched,
                    profile_size: profile.symptoms().len(),
                    confidence: exact_confidence(profile, matched),
                })
            })
            .collect();

        // Stable sort keeps catalogue order for equal scores
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        candidates
    }

    fn partial_confidence(&self, profile: &DiseaseProfile, matched: usize, input_len: usize) -> f64 {
        let denominator = input_len.max(profile.symptoms().len()) as f64;
        (matched as f64 / denominator * profile.weight() * self.thresholds.partial_match_discount)
            .min(1.0)
    }
}

fn exact_confidence(profile: &DiseaseProfile, matched: usize) -> f64 {
    (matched as f64 / profile.symptoms().len() as f64 * profile.weight()).min(1.0)
}
