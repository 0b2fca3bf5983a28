//! Application-level configuration.
//!
//! - [`EngineConfig`] — thresholds, trainer settings, and lifecycle policy

pub mod engine_config;

pub use engine_config::EngineConfig;
