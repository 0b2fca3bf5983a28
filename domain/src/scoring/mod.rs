//! Rule-based scoring

pub mod rule_based;

pub use rule_based::{RuleBasedScorer, RuleCandidate, RuleThresholds};
