//! File-backed persistence adapters.
//!
//! - [`JsonModelStore`]: trained-model snapshots
//! - [`JsonlTrainingJournal`]: append-only training examples

mod json_model_store;
mod jsonl_journal;

pub use json_model_store::{FORMAT_VERSION, JsonModelStore};
pub use jsonl_journal::JsonlTrainingJournal;
