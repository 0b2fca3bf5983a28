//! Configuration file loading for symptom-triage
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `TRIAGE_*` environment variables (`__` separates sections)
//! 3. Project root: `./triage.toml` or `./.triage.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/symptom-triage/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod validation;

pub use file_config::{
    FileConfig, FileEngineConfig, FileLoggingConfig, FileStorageConfig, data_dir,
};
pub use loader::ConfigLoader;
pub use validation::{ConfigIssue, ConfigIssueCode, ConfigValidationError, Severity};
