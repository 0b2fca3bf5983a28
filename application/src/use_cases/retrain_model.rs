//! Retrain Model use case
//!
//! Rebuilds the statistical model from the full training log on a blocking
//! worker, publishes it atomically, and optionally persists it. Predictions
//! keep using the previously published model for the whole duration.

use crate::ports::model_store::ModelStore;
use crate::ports::progress::{NoRetrainProgress, RetrainProgress};
use crate::state::EngineState;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use triage_domain::{DomainError, PublishedModel, TrainedModel};

/// Errors that can occur during a retrain
#[derive(Error, Debug)]
pub enum RetrainModelError {
    #[error("Not enough training data: {0}")]
    NotEnoughData(String),

    #[error("Retrain cancelled")]
    Cancelled,

    #[error("Training task failed: {0}")]
    TaskFailed(String),

    #[error("Training failed: {0}")]
    Domain(DomainError),
}

impl RetrainModelError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetrainModelError::Cancelled)
    }
}

impl From<DomainError> for RetrainModelError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Cancelled => RetrainModelError::Cancelled,
            DomainError::ModelNotTrained(reason) => RetrainModelError::NotEnoughData(reason),
            other => RetrainModelError::Domain(other),
        }
    }
}

/// Input for the RetrainModel use case
#[derive(Debug, Clone, Default)]
pub struct RetrainInput {
    /// Save the new model through the configured store
    pub persist: bool,
    pub cancellation: Option<CancellationToken>,
}

impl RetrainInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persisted(mut self) -> Self {
        self.persist = true;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Outcome of a successful retrain
#[derive(Debug, Clone)]
pub struct RetrainOutput {
    pub model: Arc<TrainedModel>,
    /// Live-model generation after publishing
    pub generation: u64,
    /// Whether the new model was written to the store
    pub saved: bool,
    /// Why saving failed, when it was attempted and failed
    pub save_error: Option<String>,
}

/// Use case for rebuilding the statistical model
pub struct RetrainModelUseCase {
    state: EngineState,
    store: Arc<dyn ModelStore>,
}

impl RetrainModelUseCase {
    pub fn new(state: EngineState, store: Arc<dyn ModelStore>) -> Self {
        Self { state, store }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RetrainInput) -> Result<RetrainOutput, RetrainModelError> {
        self.execute_with_progress(input, &NoRetrainProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RetrainInput,
        progress: &dyn RetrainProgress,
    ) -> Result<RetrainOutput, RetrainModelError> {
        let examples = self.state.knowledge.example_count();
        info!("Retraining statistical model on {} examples", examples);
        progress.on_retrain_start(examples);

        let fitted = self.fit(input.cancellation.clone()).await;
        let PublishedModel { model, generation } = match fitted {
            Ok(published) => published,
            Err(e) => {
                warn!("Retrain failed, keeping previous model: {}", e);
                progress.on_retrain_failed(&e.to_string());
                return Err(e);
            }
        };

        info!(
            "Published model generation {} ({} examples, {} classes)",
            generation,
            model.trained_on,
            model.classes().len()
        );
        progress.on_retrain_complete(model.trained_on, model.classes().len());

        let (saved, save_error) = if input.persist {
            self.persist(&model, progress).await
        } else {
            (false, None)
        };

        Ok(RetrainOutput {
            model,
            generation,
            saved,
            save_error,
        })
    }

    async fn fit(
        &self,
        cancellation: Option<CancellationToken>,
    ) -> Result<PublishedModel, RetrainModelError> {
        let knowledge = Arc::clone(&self.state.knowledge);
        let classifier = Arc::clone(&self.state.classifier);

        let joined = tokio::task::spawn_blocking(move || {
            let interrupt = || {
                cancellation
                    .as_ref()
                    .is_some_and(|token| token.is_cancelled())
            };
            classifier.retrain_interruptible(&knowledge, &interrupt)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(RetrainModelError::from),
            Err(e) => Err(RetrainModelError::TaskFailed(e.to_string())),
        }
    }

    async fn persist(
        &self,
        model: &TrainedModel,
        progress: &dyn RetrainProgress,
    ) -> (bool, Option<String>) {
        let location = self.store.location();
        match self.store.save(model).await {
            Ok(()) => {
                debug!("Saved model to {}", location);
                progress.on_model_saved(&location, true);
                (true, None)
            }
            Err(e) => {
                warn!("Failed to save model to {}: {}", location, e);
                progress.on_model_saved(&location, false);
                (false, Some(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_store::{ModelStoreError, NoModelStore};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use triage_domain::{SymptomSet, TrainingExample, seed_corpus};

    fn seeded_state() -> EngineState {
        let state = EngineState::default();
        for example in seed_corpus() {
            state.knowledge.record(example);
        }
        state
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Option<TrainedModel>>,
    }

    #[async_trait]
    impl ModelStore for MemoryStore {
        async fn load(&self) -> Result<TrainedModel, ModelStoreError> {
            self.saved
                .lock()
                .unwrap()
                .clone()
                .ok_or(ModelStoreError::NotFound)
        }

        async fn save(&self, model: &TrainedModel) -> Result<(), ModelStoreError> {
            *self.saved.lock().unwrap() = Some(model.clone());
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ModelStore for FailingStore {
        async fn load(&self) -> Result<TrainedModel, ModelStoreError> {
            Err(ModelStoreError::NotFound)
        }

        async fn save(&self, _model: &TrainedModel) -> Result<(), ModelStoreError> {
            Err(ModelStoreError::Io("permission denied".to_string()))
        }

        fn location(&self) -> String {
            "/read-only/model.json".to_string()
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl RetrainProgress for RecordingProgress {
        fn on_retrain_start(&self, examples: usize) {
            self.events.lock().unwrap().push(format!("start:{}", examples));
        }

        fn on_retrain_complete(&self, trained_on: usize, classes: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("complete:{}:{}", trained_on, classes));
        }

        fn on_retrain_failed(&self, _reason: &str) {
            self.events.lock().unwrap().push("failed".to_string());
        }

        fn on_model_saved(&self, _location: &str, success: bool) {
            self.events.lock().unwrap().push(format!("saved:{}", success));
        }
    }

    #[tokio::test]
    async fn test_retrain_publishes_model() {
        let state = seeded_state();
        let uc = RetrainModelUseCase::new(state.clone(), Arc::new(NoModelStore));

        let output = uc.execute(RetrainInput::new()).await.unwrap();

        assert_eq!(output.model.trained_on, 21);
        assert_eq!(output.generation, 1);
        assert!(!output.saved);
        assert!(state.classifier.live().is_trained());
    }

    #[tokio::test]
    async fn test_concurrent_retrains_report_their_own_generation() {
        let state = seeded_state();
        let uc = RetrainModelUseCase::new(state.clone(), Arc::new(NoModelStore));

        let (a, b) = tokio::join!(uc.execute(RetrainInput::new()), uc.execute(RetrainInput::new()));
        let (a, b) = (a.unwrap(), b.unwrap());

        let mut generations = [a.generation, b.generation];
        generations.sort_unstable();
        assert_eq!(generations, [1, 2]);

        let latest = if a.generation == 2 { &a } else { &b };
        assert!(Arc::ptr_eq(&latest.model, &state.classifier.current().unwrap()));
    }

    #[tokio::test]
    async fn test_retrain_with_too_few_examples() {
        let state = EngineState::default();
        state.knowledge.record(TrainingExample::labelled(
            SymptomSet::from_tokens(["fever"]),
            "Flu",
        ));
        let uc = RetrainModelUseCase::new(state.clone(), Arc::new(NoModelStore));

        let err = uc.execute(RetrainInput::new()).await.unwrap_err();
        assert!(matches!(err, RetrainModelError::NotEnoughData(_)));
        assert!(!state.classifier.live().is_trained());
    }

    #[tokio::test]
    async fn test_cancelled_retrain_keeps_previous_model() {
        let state = seeded_state();
        let uc = RetrainModelUseCase::new(state.clone(), Arc::new(NoModelStore));
        let first = uc.execute(RetrainInput::new()).await.unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let err = uc
            .execute(RetrainInput::new().with_cancellation(token))
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        let current = state.classifier.current().unwrap();
        assert!(Arc::ptr_eq(&current, &first.model));
        assert_eq!(state.classifier.live().generation(), 1);
    }

    #[tokio::test]
    async fn test_persisted_retrain_saves() {
        let store = Arc::new(MemoryStore::default());
        let uc = RetrainModelUseCase::new(seeded_state(), store.clone());
        let progress = RecordingProgress::default();

        let output = uc
            .execute_with_progress(RetrainInput::new().persisted(), &progress)
            .await
            .unwrap();

        assert!(output.saved);
        let loaded = store.load().await.unwrap();
        assert!(loaded.same_parameters(&output.model));
        assert_eq!(
            *progress.events.lock().unwrap(),
            vec!["start:21", "complete:21:8", "saved:true"]
        );
    }

    #[tokio::test]
    async fn test_save_failure_is_reported_not_fatal() {
        let state = seeded_state();
        let uc = RetrainModelUseCase::new(state.clone(), Arc::new(FailingStore));

        let output = uc.execute(RetrainInput::new().persisted()).await.unwrap();

        assert!(!output.saved);
        assert!(output.save_error.unwrap().contains("permission denied"));
        assert!(state.classifier.live().is_trained());
    }

    #[test]
    fn test_domain_error_mapping() {
        assert!(RetrainModelError::from(DomainError::Cancelled).is_cancelled());
        assert!(matches!(
            RetrainModelError::from(DomainError::ModelNotTrained("x".into())),
            RetrainModelError::NotEnoughData(_)
        ));
    }
}
