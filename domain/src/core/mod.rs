//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] — domain-level errors
//! - [`sync`] — lock helpers shared by the knowledge base and model slot

pub mod error;
pub mod sync;
