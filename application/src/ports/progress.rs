//! Progress notification port
//!
//! Defines the interface for reporting progress while the model retrains.

/// Callback for retrain progress
///
/// Implementations live in the presentation layer.
pub trait RetrainProgress: Send + Sync {
    /// Called before fitting starts
    fn on_retrain_start(&self, examples: usize);

    /// Called once the new model is live
    fn on_retrain_complete(&self, trained_on: usize, classes: usize);

    /// Called when fitting fails or is cancelled; the previous model stays live
    fn on_retrain_failed(&self, reason: &str);

    /// Called after a save attempt following a successful retrain
    fn on_model_saved(&self, _location: &str, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoRetrainProgress;

impl RetrainProgress for NoRetrainProgress {
    fn on_retrain_start(&self, _examples: usize) {}
    fn on_retrain_complete(&self, _trained_on: usize, _classes: usize) {}
    fn on_retrain_failed(&self, _reason: &str) {}
}
