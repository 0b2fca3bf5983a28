//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod model_lifecycle;
pub mod predict_disease;
pub mod retrain_model;
pub mod submit_training_example;
