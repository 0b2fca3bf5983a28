//! Logging configuration from TOML (`[logging]` section)

use super::super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Raw logging configuration from TOML
///
/// `-v` on the command line takes precedence over `level`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub level: Option<String>,
}

impl FileLoggingConfig {
    /// The configured level if it is one tracing understands
    pub fn parse_level(&self) -> (Option<String>, Vec<ConfigIssue>) {
        let Some(level) = &self.level else {
            return (None, vec![]);
        };
        let normalized = level.trim().to_lowercase();
        if LEVELS.contains(&normalized.as_str()) {
            return (Some(normalized), vec![]);
        }
        let issue = ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::UnknownLogLevel {
                value: level.clone(),
            },
            message: format!(
                "logging.level: unknown level '{}', expected one of {}",
                level,
                LEVELS.join(", ")
            ),
        };
        (None, vec![issue])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        let config = FileLoggingConfig {
            level: Some("DEBUG".to_string()),
        };
        assert_eq!(config.parse_level(), (Some("debug".to_string()), vec![]));
        assert_eq!(FileLoggingConfig::default().parse_level().0, None);
    }

    #[test]
    fn test_unknown_level_warns() {
        let config = FileLoggingConfig {
            level: Some("loud".to_string()),
        };
        let (level, issues) = config.parse_level();
        assert!(level.is_none());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
