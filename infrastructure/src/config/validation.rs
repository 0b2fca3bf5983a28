//! Structured configuration issues.

use std::fmt;
use thiserror::Error;

/// Severity level for configuration issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the engine cannot start with this value.
    Error,
    /// Non-fatal: the value works but is probably not what was meant.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssueCode {
    /// A probability-like value outside `[0, 1]`.
    OutOfRange { field: String, value: f64 },
    /// A value that must be strictly positive.
    NotPositive { field: String, value: f64 },
    /// A `[logging] level` tracing does not recognise.
    UnknownLogLevel { value: String },
    /// A setting that makes another one ineffective.
    Ineffective { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Configuration that cannot be used
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{} configuration error(s): {}", .0.len(), join(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn join(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
