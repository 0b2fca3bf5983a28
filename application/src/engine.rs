//! The triage engine facade.
//!
//! [`TriageEngine`] wires the use cases around one shared [`EngineState`]
//! and is the only type the presentation layer talks to. It is `Send + Sync`
//! and meant to be held in an `Arc`: predictions may run from any number of
//! threads while a retrain is in progress.

use crate::config::EngineConfig;
use crate::ports::model_store::{ModelStore, ModelStoreError};
use crate::ports::progress::RetrainProgress;
use crate::ports::training_journal::TrainingJournal;
use crate::state::EngineState;
use crate::use_cases::model_lifecycle::{BootstrapReport, ModelLifecycleUseCase};
use crate::use_cases::predict_disease::{PredictDiseaseUseCase, PredictionExplanation};
use crate::use_cases::retrain_model::{
    RetrainInput, RetrainModelError, RetrainModelUseCase, RetrainOutput,
};
use crate::use_cases::submit_training_example::{
    SubmitOutput, SubmitTrainingExampleUseCase, SubmitTrainingInput,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use triage_domain::{
    DiseaseCatalogue, HybridArbiter, KnowledgeBase, PredictionResult, RuleBasedScorer,
    SymptomSet, TrainingExample,
};

/// Snapshot of the engine's model and data, for `info`-style reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineInfo {
    pub model_trained: bool,
    pub generation: u64,
    pub classes: Vec<String>,
    pub vocabulary_size: usize,
    pub trained_on: usize,
    pub trained_at: Option<DateTime<Utc>>,
    pub training_examples: usize,
    pub catalogue_size: usize,
    pub fallback_threshold: f64,
    pub model_location: String,
}

pub struct TriageEngine {
    state: EngineState,
    config: EngineConfig,
    store: Arc<dyn ModelStore>,
    predict: PredictDiseaseUseCase,
    submit: SubmitTrainingExampleUseCase,
    retrain: RetrainModelUseCase,
    lifecycle: ModelLifecycleUseCase,
}

impl TriageEngine {
    pub fn new(
        catalogue: DiseaseCatalogue,
        config: EngineConfig,
        store: Arc<dyn ModelStore>,
        journal: Arc<dyn TrainingJournal>,
    ) -> Self {
        let state = EngineState::new(catalogue, config.trainer);
        let arbiter = HybridArbiter::new(
            config.fallback_threshold,
            RuleBasedScorer::new(config.rules),
        );

        Self {
            predict: PredictDiseaseUseCase::new(state.clone(), arbiter),
            submit: SubmitTrainingExampleUseCase::new(state.clone(), Arc::clone(&journal))
                .with_auto_retrain_every(config.auto_retrain_every),
            retrain: RetrainModelUseCase::new(state.clone(), Arc::clone(&store)),
            lifecycle: ModelLifecycleUseCase::new(state.clone(), Arc::clone(&store), journal)
                .with_always_seed(config.always_seed),
            state,
            config,
            store,
        }
    }

    /// Load the training data and the model
    pub async fn start(&self) -> BootstrapReport {
        self.lifecycle.bootstrap().await
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.state.knowledge
    }

    // ==================== Prediction ====================

    /// Classify a symptom set.
    ///
    /// With `record_predictions` enabled, definite results are fed back
    /// into the training log.
    pub fn predict_disease(&self, symptoms: &SymptomSet) -> PredictionResult {
        let result = self.predict.execute(symptoms);
        if self.config.record_predictions {
            self.record_prediction(symptoms, &result);
        }
        result
    }

    /// Classify and return both strategies' rankings
    pub fn explain(&self, symptoms: &SymptomSet) -> PredictionExplanation {
        let explanation = self.predict.explain(symptoms);
        if self.config.record_predictions {
            self.record_prediction(symptoms, &explanation.arbitration.result);
        }
        explanation
    }

    /// Feed a prediction back as a training example. Healthy and Unknown
    /// results carry no label and are skipped.
    pub fn record_prediction(
        &self,
        symptoms: &SymptomSet,
        result: &PredictionResult,
    ) -> Option<SubmitOutput> {
        if result.is_healthy() || result.is_unknown() {
            debug!("Not recording {} prediction", result.disease);
            return None;
        }
        let example = TrainingExample::from_prediction(symptoms.clone(), result);
        Some(self.submit.execute(SubmitTrainingInput::new(
            example.symptoms,
            example.disease,
            example.confidence,
        )))
    }

    // ==================== Training ====================

    pub fn submit_training_example(&self, input: SubmitTrainingInput) -> SubmitOutput {
        self.submit.execute(input)
    }

    pub async fn retrain_model(&self, input: RetrainInput) -> Result<RetrainOutput, RetrainModelError> {
        let output = self.retrain.execute(input).await?;
        self.submit.reset_pending();
        Ok(output)
    }

    pub async fn retrain_model_with_progress(
        &self,
        input: RetrainInput,
        progress: &dyn RetrainProgress,
    ) -> Result<RetrainOutput, RetrainModelError> {
        let output = self.retrain.execute_with_progress(input, progress).await?;
        self.submit.reset_pending();
        Ok(output)
    }

    /// Retrain when enough submissions have accumulated, cancelling on `token`
    pub async fn retrain_if_due(
        &self,
        token: CancellationToken,
    ) -> Option<Result<RetrainOutput, RetrainModelError>> {
        let every = self.config.auto_retrain_every;
        if every == 0 || self.submit.pending() < every {
            return None;
        }
        Some(
            self.retrain_model(RetrainInput::new().with_cancellation(token))
                .await,
        )
    }

    /// Every example in the training log, in insertion order
    pub fn export_examples(&self) -> Vec<TrainingExample> {
        self.state.knowledge.all_examples().to_vec()
    }

    // ==================== Lifecycle ====================

    pub fn info(&self) -> EngineInfo {
        let model = self.state.classifier.current();
        EngineInfo {
            model_trained: model.is_some(),
            generation: self.state.classifier.live().generation(),
            classes: model
                .as_ref()
                .map(|m| m.classes().to_vec())
                .unwrap_or_default(),
            vocabulary_size: model.as_ref().map_or(0, |m| m.vocabulary().len()),
            trained_on: model.as_ref().map_or(0, |m| m.trained_on),
            trained_at: model.as_ref().map(|m| m.trained_at),
            training_examples: self.state.knowledge.example_count(),
            catalogue_size: self.state.knowledge.catalogue().len(),
            fallback_threshold: self.config.fallback_threshold,
            model_location: self.store.location(),
        }
    }

    /// Persist the live model
    pub async fn save_model(&self) -> Result<bool, ModelStoreError> {
        self.lifecycle.save().await
    }

    /// Save on exit when configured. Failures are logged, not returned.
    pub async fn shutdown(&self) {
        if !self.config.save_on_exit {
            return;
        }
        if let Err(e) = self.lifecycle.save().await {
            warn!("Failed to save model on shutdown: {}", e);
        }
    }
}
