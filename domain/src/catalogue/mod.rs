//! Disease catalogue
//!
//! The catalogue is loaded once at startup and never mutated afterwards.
//! Predictions and training only ever read it.

pub mod profile;
pub mod registry;

pub use profile::DiseaseProfile;
pub use registry::DiseaseCatalogue;
