//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types.

mod engine;
mod logging;
mod storage;

pub use engine::FileEngineConfig;
pub use logging::FileLoggingConfig;
pub use storage::{FileStorageConfig, data_dir};

use super::validation::{ConfigIssue, ConfigValidationError};
use serde::{Deserialize, Serialize};
use triage_application::EngineConfig;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Thresholds, trainer settings, and retrain cadence
    pub engine: FileEngineConfig,
    /// Snapshot and journal locations
    pub storage: FileStorageConfig,
    /// Log level
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.engine.validate();
        issues.extend(self.logging.parse_level().1);
        issues
    }

    /// Validate, failing on any error and returning the remaining warnings
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError::Invalid(errors))
        }
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_fallback_threshold(self.engine.fallback_threshold)
            .with_rules(self.engine.rule_thresholds())
            .with_trainer(self.engine.trainer_settings())
            .with_record_predictions(self.engine.record_predictions)
            .with_auto_retrain_every(self.engine.auto_retrain_every)
            .with_always_seed(self.storage.seed_with_default_corpus)
            .with_save_on_exit(self.storage.save_on_exit)
    }
}
