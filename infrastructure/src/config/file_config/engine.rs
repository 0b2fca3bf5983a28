//! Engine configuration from TOML (`[engine]` section)

use super::super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use triage_application::EngineConfig;
use triage_domain::{RuleThresholds, TrainerSettings};

/// Raw engine configuration from TOML
///
/// # Example
///
/// ```toml
/// [engine]
/// fallback_threshold = 0.3        # statistical confidence below this uses the rules
/// partial_match_threshold = 0.3   # best exact score below this tries partial matching
/// partial_match_discount = 0.7
/// min_training_examples = 3
/// laplace_alpha = 1.0
/// record_predictions = false      # feed definite predictions back as training data
/// auto_retrain_every = 0          # 0 = retrain only on request
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    pub fallback_threshold: f64,
    pub partial_match_threshold: f64,
    pub partial_match_discount: f64,
    pub min_training_examples: usize,
    pub laplace_alpha: f64,
    pub record_predictions: bool,
    pub auto_retrain_every: usize,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            fallback_threshold: engine.fallback_threshold,
            partial_match_threshold: engine.rules.partial_match_threshold,
            partial_match_discount: engine.rules.partial_match_discount,
            min_training_examples: engine.trainer.min_examples,
            laplace_alpha: engine.trainer.alpha,
            record_predictions: engine.record_predictions,
            auto_retrain_every: engine.auto_retrain_every,
        }
    }
}

impl FileEngineConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("engine.fallback_threshold", self.fallback_threshold),
            ("engine.partial_match_threshold", self.partial_match_threshold),
            ("engine.partial_match_discount", self.partial_match_discount),
        ] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::OutOfRange {
                        field: field.to_string(),
                        value,
                    },
                    message: format!("{}: {} is outside [0, 1]", field, value),
                });
            }
        }

        if self.partial_match_discount == 0.0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::NotPositive {
                    field: "engine.partial_match_discount".to_string(),
                    value: self.partial_match_discount,
                },
                message: "engine.partial_match_discount: must be greater than 0".to_string(),
            });
        }

        if !(self.laplace_alpha > 0.0 && self.laplace_alpha.is_finite()) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::NotPositive {
                    field: "engine.laplace_alpha".to_string(),
                    value: self.laplace_alpha,
                },
                message: format!(
                    "engine.laplace_alpha: {} must be a positive number",
                    self.laplace_alpha
                ),
            });
        }

        if self.fallback_threshold == 0.0 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::Ineffective {
                    field: "engine.fallback_threshold".to_string(),
                },
                message: "engine.fallback_threshold: 0 means the rule-based fallback is only \
                          used while the model is untrained"
                    .to_string(),
            });
        }

        if self.min_training_examples < 2 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::Ineffective {
                    field: "engine.min_training_examples".to_string(),
                },
                message: "engine.min_training_examples: training still needs two diseases, \
                          values below 2 have no extra effect"
                    .to_string(),
            });
        }

        issues
    }

    pub fn rule_thresholds(&self) -> RuleThresholds {
        RuleThresholds {
            partial_match_threshold: self.partial_match_threshold,
            partial_match_discount: self.partial_match_discount,
        }
    }

    pub fn trainer_settings(&self) -> TrainerSettings {
        TrainerSettings {
            alpha: self.laplace_alpha,
            min_examples: self.min_training_examples,
        }
    }
}
