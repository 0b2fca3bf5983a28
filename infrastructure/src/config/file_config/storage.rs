//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "symptom-triage";

/// Raw storage configuration from TOML
///
/// # Example
///
/// ```toml
/// [storage]
/// model_path = "~/.local/share/symptom-triage/model.json"
/// journal_path = "~/.local/share/symptom-triage/training.jsonl"
/// save_on_exit = true
/// seed_with_default_corpus = false   # also load the seed corpus when the journal has data
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    pub model_path: Option<PathBuf>,
    pub journal_path: Option<PathBuf>,
    pub save_on_exit: bool,
    pub seed_with_default_corpus: bool,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            journal_path: None,
            save_on_exit: true,
            seed_with_default_corpus: false,
        }
    }
}

impl FileStorageConfig {
    /// Model snapshot path, defaulting under the platform data directory
    pub fn resolved_model_path(&self) -> PathBuf {
        self.model_path
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| data_dir().join("model.json"))
    }

    /// Training journal path, defaulting under the platform data directory
    pub fn resolved_journal_path(&self) -> PathBuf {
        self.journal_path
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| data_dir().join("training.jsonl"))
    }
}

/// `$XDG_DATA_HOME/symptom-triage`, or `./.symptom-triage` when the
/// platform has no data directory
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
}

fn expand_home(path: &std::path::Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_live_under_data_dir() {
        let storage = FileStorageConfig::default();
        let model = storage.resolved_model_path();
        let journal = storage.resolved_journal_path();
        assert!(model.ends_with("symptom-triage/model.json"));
        assert!(journal.ends_with("symptom-triage/training.jsonl"));
        assert!(storage.save_on_exit);
    }

    #[test]
    fn test_explicit_paths_win() {
        let storage = FileStorageConfig {
            model_path: Some(PathBuf::from("/tmp/m.json")),
            journal_path: Some(PathBuf::from("/tmp/j.jsonl")),
            ..Default::default()
        };
        assert_eq!(storage.resolved_model_path(), PathBuf::from("/tmp/m.json"));
        assert_eq!(storage.resolved_journal_path(), PathBuf::from("/tmp/j.jsonl"));
    }

    #[test]
    fn test_tilde_is_expanded() {
        let storage = FileStorageConfig {
            model_path: Some(PathBuf::from("~/triage/model.json")),
            ..Default::default()
        };
        let resolved = storage.resolved_model_path();
        if dirs::home_dir().is_some() {
            assert!(!resolved.starts_with("~"));
        }
        assert!(resolved.ends_with("triage/model.json"));
    }
}
