//! Engine parameters — thresholds and lifecycle policy.
//!
//! [`EngineConfig`] groups the static parameters that control the
//! [`TriageEngine`](crate::engine::TriageEngine): classification thresholds,
//! trainer settings, and when training examples are recorded or the model
//! is rebuilt.

use serde::{Deserialize, Serialize};
use triage_domain::{RuleThresholds, TrainerSettings};

/// Engine control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Statistical confidence below which the rule-based result is used.
    pub fallback_threshold: f64,
    /// Rule-based scorer thresholds.
    pub rules: RuleThresholds,
    /// Trainer smoothing and minimum corpus size.
    pub trainer: TrainerSettings,
    /// Feed every non-trivial prediction back as a training example.
    pub record_predictions: bool,
    /// Report a retrain as due after this many submissions (0 = never).
    pub auto_retrain_every: usize,
    /// Load the built-in seed corpus even when the journal has examples.
    pub always_seed: bool,
    /// Save the live model when the engine shuts down.
    pub save_on_exit: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_threshold: 0.3,
            rules: RuleThresholds::default(),
            trainer: TrainerSettings::default(),
            record_predictions: false,
            auto_retrain_every: 0,
            always_seed: false,
            save_on_exit: true,
        }
    }
}

impl EngineConfig {
    // ==================== Builder Methods ====================

    pub fn with_fallback_threshold(mut self, threshold: f64) -> Self {
        self.fallback_threshold = threshold;
        self
    }

    pub fn with_rules(mut self, rules: RuleThresholds) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_trainer(mut self, trainer: TrainerSettings) -> Self {
        self.trainer = trainer;
        self
    }

    pub fn with_record_predictions(mut self, record: bool) -> Self {
        self.record_predictions = record;
        self
    }

    pub fn with_auto_retrain_every(mut self, every: usize) -> Self {
        self.auto_retrain_every = every;
        self
    }

    pub fn with_always_seed(mut self, always: bool) -> Self {
        self.always_seed = always;
        self
    }

    pub fn with_save_on_exit(mut self, save: bool) -> Self {
        self.save_on_exit = save;
        self
    }
}
