//! Infrastructure layer for symptom-triage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod persistence;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, ConfigValidationError, FileConfig, FileEngineConfig,
    FileLoggingConfig, FileStorageConfig, Severity,
};
pub use persistence::{JsonModelStore, JsonlTrainingJournal};
