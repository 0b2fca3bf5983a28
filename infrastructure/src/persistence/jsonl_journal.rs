//! JSONL file journal for training examples.
//!
//! Each [`TrainingExample`] is serialized as a single JSON line and
//! appended to the file via a buffered writer. Replaying skips lines that
//! do not parse so one damaged record cannot hide the rest.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};
use triage_application::{JournalError, TrainingJournal};
use triage_domain::TrainingExample;

/// Append-only training journal that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record
/// and on `Drop`.
pub struct JsonlTrainingJournal {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTrainingJournal {
    /// Open the journal for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                JournalError::Io(format!(
                    "could not create journal directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                JournalError::Io(format!("could not open journal {}: {}", path.display(), e))
            })?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer(&self) -> MutexGuard<'_, BufWriter<File>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TrainingJournal for JsonlTrainingJournal {
    fn append(&self, example: &TrainingExample) -> Result<(), JournalError> {
        let line =
            serde_json::to_string(example).map_err(|e| JournalError::Encoding(e.to_string()))?;

        let mut writer = self.writer();
        writeln!(writer, "{}", line).map_err(|e| JournalError::Io(e.to_string()))?;
        writer.flush().map_err(|e| JournalError::Io(e.to_string()))
    }

    fn load_all(&self) -> Result<Vec<TrainingExample>, JournalError> {
        // Anything still buffered must be visible to the reader below
        self.writer()
            .flush()
            .map_err(|e| JournalError::Io(e.to_string()))?;

        let file = File::open(&self.path).map_err(|e| JournalError::Io(e.to_string()))?;
        let mut examples = Vec::new();
        let mut skipped = 0usize;

        // Split on raw bytes: a line that is not UTF-8 is just another
        // malformed record
        for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line.map_err(|e| JournalError::Io(e.to_string()))?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice::<TrainingExample>(&line) {
                Ok(example) => examples.push(example),
                Err(e) => {
                    skipped += 1;
                    warn!(
                        "Skipping malformed journal line {} in {}: {}",
                        index + 1,
                        self.path.display(),
                        e
                    );
                }
            }
        }

        debug!(
            "Replayed {} training examples from {} ({} skipped)",
            examples.len(),
            self.path.display(),
            skipped
        );
        Ok(examples)
    }
}

impl Drop for JsonlTrainingJournal {
    fn drop(&mut self) {
        let _ = self.writer().flush();
    }
}
