//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod model_store;
pub mod progress;
pub mod training_journal;
