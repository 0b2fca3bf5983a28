//! Symptom vocabulary and input sets
//!
//! - [`Symptom`] — the closed set of symptoms the catalogue is written in
//! - [`SymptomToken`] — a normalized, possibly unknown, reported symptom
//! - [`SymptomSet`] — what a caller submits for prediction

pub mod known;
pub mod set;
pub mod token;

pub use known::Symptom;
pub use set::SymptomSet;
pub use token::SymptomToken;
