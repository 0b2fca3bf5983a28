//! Submit Training Example use case
//!
//! Appends a labelled example to the in-memory training log and to the
//! durable journal. Recording never retrains; it only reports when a
//! retrain has become due under the configured cadence.

use crate::ports::training_journal::TrainingJournal;
use crate::state::EngineState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};
use triage_domain::{SymptomSet, TrainingExample};

/// Input for [`SubmitTrainingExampleUseCase`]
#[derive(Debug, Clone)]
pub struct SubmitTrainingInput {
    pub symptoms: SymptomSet,
    pub disease: String,
    pub confidence: f64,
}

impl SubmitTrainingInput {
    pub fn new(symptoms: SymptomSet, disease: impl Into<String>, confidence: f64) -> Self {
        Self {
            symptoms,
            disease: disease.into(),
            confidence,
        }
    }

    /// A staff-confirmed label
    pub fn confirmed(symptoms: SymptomSet, disease: impl Into<String>) -> Self {
        Self::new(symptoms, disease, 1.0)
    }
}

/// What happened to a submitted example
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutput {
    /// Zero-based position in the training log
    pub position: usize,
    /// Whether the example reached the durable journal
    pub journaled: bool,
    /// Whether the label names a catalogue disease
    pub in_catalogue: bool,
    /// Submissions since the last retrain reached the configured cadence
    pub retrain_due: bool,
}

/// Use case for recording a training example
pub struct SubmitTrainingExampleUseCase {
    state: EngineState,
    journal: Arc<dyn TrainingJournal>,
    auto_retrain_every: usize,
    pending: AtomicUsize,
}

impl SubmitTrainingExampleUseCase {
    pub fn new(state: EngineState, journal: Arc<dyn TrainingJournal>) -> Self {
        Self {
            state,
            journal,
            auto_retrain_every: 0,
            pending: AtomicUsize::new(0),
        }
    }

    pub fn with_auto_retrain_every(mut self, every: usize) -> Self {
        self.auto_retrain_every = every;
        self
    }

    /// Record the example. Journal failures are logged and reported in the
    /// output; the in-memory append always happens.
    pub fn execute(&self, input: SubmitTrainingInput) -> SubmitOutput {
        let example = TrainingExample::new(input.symptoms, input.disease, input.confidence);
        let in_catalogue = self.state.knowledge.catalogue().contains(&example.disease);
        if !in_catalogue {
            debug!(
                "Recording example labelled '{}', which is not in the catalogue",
                example.disease
            );
        }

        let journaled = match self.journal.append(&example) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to journal training example: {}", e);
                false
            }
        };

        let position = self.state.knowledge.record(example);
        let pending = self.pending.fetch_add(1, Ordering::AcqRel) + 1;
        let retrain_due = self.auto_retrain_every > 0 && pending >= self.auto_retrain_every;

        debug!(
            "Recorded training example #{} ({} pending since last retrain)",
            position, pending
        );

        SubmitOutput {
            position,
            journaled,
            in_catalogue,
            retrain_due,
        }
    }

    /// Submissions since the last [`reset_pending`](Self::reset_pending)
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Called after a successful retrain
    pub fn reset_pending(&self) {
        self.pending.store(0, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::training_journal::{JournalError, NoTrainingJournal};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryJournal {
        entries: Mutex<Vec<TrainingExample>>,
    }

    impl TrainingJournal for MemoryJournal {
        fn append(&self, example: &TrainingExample) -> Result<(), JournalError> {
            self.entries.lock().unwrap().push(example.clone());
            Ok(())
        }

        fn load_all(&self) -> Result<Vec<TrainingExample>, JournalError> {
            Ok(self.entries.lock().unwrap().clone())
        }
    }

    struct BrokenJournal;

    impl TrainingJournal for BrokenJournal {
        fn append(&self, _example: &TrainingExample) -> Result<(), JournalError> {
            Err(JournalError::Io("read-only file system".to_string()))
        }

        fn load_all(&self) -> Result<Vec<TrainingExample>, JournalError> {
            Ok(Vec::new())
        }
    }

    fn flu_input() -> SubmitTrainingInput {
        SubmitTrainingInput::confirmed(SymptomSet::from_tokens(["fever", "cough"]), "Flu")
    }

    #[test]
    fn test_submit_appends_to_log_and_journal() {
        let state = EngineState::default();
        let journal = Arc::new(MemoryJournal::default());
        let uc = SubmitTrainingExampleUseCase::new(state.clone(), journal.clone());

        let first = uc.execute(flu_input());
        let second = uc.execute(SubmitTrainingInput::new(
            SymptomSet::from_tokens(["rash"]),
            "Chickenpox",
            0.6,
        ));

        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);
        assert!(first.journaled && first.in_catalogue);
        assert_eq!(state.knowledge.example_count(), 2);
        assert_eq!(journal.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_submit_does_not_retrain() {
        let state = EngineState::default();
        let uc = SubmitTrainingExampleUseCase::new(state.clone(), Arc::new(NoTrainingJournal));
        for _ in 0..5 {
            uc.execute(flu_input());
        }
        assert!(!state.classifier.live().is_trained());
    }

    #[test]
    fn test_label_outside_catalogue_is_accepted() {
        let state = EngineState::default();
        let uc = SubmitTrainingExampleUseCase::new(state.clone(), Arc::new(NoTrainingJournal));
        let output = uc.execute(SubmitTrainingInput::confirmed(
            SymptomSet::from_tokens(["itching"]),
            "Scabies",
        ));
        assert!(!output.in_catalogue);
        assert_eq!(state.knowledge.example_count(), 1);
    }

    #[test]
    fn test_journal_failure_keeps_example_in_memory() {
        let state = EngineState::default();
        let uc = SubmitTrainingExampleUseCase::new(state.clone(), Arc::new(BrokenJournal));
        let output = uc.execute(flu_input());
        assert!(!output.journaled);
        assert_eq!(state.knowledge.example_count(), 1);
    }

    #[test]
    fn test_retrain_due_cadence() {
        let uc = SubmitTrainingExampleUseCase::new(
            EngineState::default(),
            Arc::new(NoTrainingJournal),
        )
        .with_auto_retrain_every(3);

        assert!(!uc.execute(flu_input()).retrain_due);
        assert!(!uc.execute(flu_input()).retrain_due);
        assert!(uc.execute(flu_input()).retrain_due);

        uc.reset_pending();
        assert_eq!(uc.pending(), 0);
        assert!(!uc.execute(flu_input()).retrain_due);
    }

    #[test]
    fn test_cadence_disabled_by_default() {
        let uc = SubmitTrainingExampleUseCase::new(
            EngineState::default(),
            Arc::new(NoTrainingJournal),
        );
        for _ in 0..50 {
            assert!(!uc.execute(flu_input()).retrain_due);
        }
    }
}
