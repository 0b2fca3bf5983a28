//! JSON file snapshots of the trained model.
//!
//! The snapshot is a pretty-printed object carrying a `format_version`
//! next to the model parameters. Saves go to a sibling temp file which is
//! then renamed over the target, so readers never see a truncated file.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use triage_application::{ModelStore, ModelStoreError};
use triage_domain::TrainedModel;

/// Snapshot layout version written by this build
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    format_version: u32,
    saved_at: DateTime<Utc>,
    model: &'a TrainedModel,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    format_version: u32,
}

#[derive(Deserialize)]
struct SnapshotIn {
    model: TrainedModel,
}

/// [`ModelStore`] backed by a single JSON file
pub struct JsonModelStore {
    path: PathBuf,
}

impl JsonModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "model.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn decode(bytes: &[u8]) -> Result<TrainedModel, ModelStoreError> {
        let header: SnapshotHeader =
            serde_json::from_slice(bytes).map_err(|e| ModelStoreError::Format(e.to_string()))?;
        if header.format_version != FORMAT_VERSION {
            return Err(ModelStoreError::Format(format!(
                "unsupported format_version {} (expected {})",
                header.format_version, FORMAT_VERSION
            )));
        }
        let snapshot: SnapshotIn =
            serde_json::from_slice(bytes).map_err(|e| ModelStoreError::Format(e.to_string()))?;
        Ok(snapshot.model)
    }
}

fn io_error(path: &Path, e: io::Error) -> ModelStoreError {
    ModelStoreError::Io(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl ModelStore for JsonModelStore {
    async fn load(&self) -> Result<TrainedModel, ModelStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ModelStoreError::NotFound);
            }
            Err(e) => return Err(io_error(&self.path, e)),
        };
        debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        Self::decode(&bytes)
    }

    async fn save(&self, model: &TrainedModel) -> Result<(), ModelStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let snapshot = SnapshotOut {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            model,
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| ModelStoreError::Format(e.to_string()))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes)
            .await
            .map_err(|e| io_error(&temp, e))?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(io_error(&self.path, e));
        }

        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
