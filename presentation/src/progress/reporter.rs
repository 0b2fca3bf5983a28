//! Progress reporting for model retraining

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use triage_application::{NoRetrainProgress, RetrainProgress};

/// How retrain progress is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Nothing (`-q`)
    Silent,
    /// Animated spinner on an interactive terminal
    Spinner,
    /// One plain line per event, for logs and pipes
    Lines,
}

impl ProgressMode {
    pub fn detect(quiet: bool, interactive: bool) -> Self {
        match (quiet, interactive) {
            (true, _) => ProgressMode::Silent,
            (false, true) => ProgressMode::Spinner,
            (false, false) => ProgressMode::Lines,
        }
    }

    pub fn reporter(self) -> Box<dyn RetrainProgress> {
        match self {
            ProgressMode::Silent => Box::new(NoRetrainProgress),
            ProgressMode::Spinner => Box::new(ProgressReporter::new()),
            ProgressMode::Lines => Box::new(SimpleProgress),
        }
    }
}

/// Reports retrain progress with a spinner
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap()
    }

    fn take(&self) -> Option<ProgressBar> {
        self.spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RetrainProgress for ProgressReporter {
    fn on_retrain_start(&self, examples: usize) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Retraining");
        pb.set_message(format!("{} examples", examples));
        pb.enable_steady_tick(Duration::from_millis(100));

        *self.spinner.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_retrain_complete(&self, trained_on: usize, classes: usize) {
        if let Some(pb) = self.take() {
            pb.finish_with_message(format!(
                "{} {} examples, {} classes",
                "done:".green(),
                trained_on,
                classes
            ));
        }
    }

    fn on_retrain_failed(&self, reason: &str) {
        if let Some(pb) = self.take() {
            pb.abandon_with_message(format!("{} {}", "failed:".red(), reason));
        }
    }
}

/// Simple text-based progress (no fancy UI). Writes to stderr so that
/// stdout stays clean for the command's own output.
pub struct SimpleProgress;

impl RetrainProgress for SimpleProgress {
    fn on_retrain_start(&self, examples: usize) {
        eprintln!(
            "{} {} ({} examples)",
            "->".cyan(),
            "Retraining".bold(),
            examples
        );
    }

    fn on_retrain_complete(&self, trained_on: usize, classes: usize) {
        eprintln!("  {} {} examples, {} classes", "v".green(), trained_on, classes);
    }

    fn on_retrain_failed(&self, reason: &str) {
        eprintln!("  {} {}", "x".red(), reason);
    }

    fn on_model_saved(&self, location: &str, success: bool) {
        if success {
            eprintln!("  {} saved to {}", "v".green(), location);
        } else {
            eprintln!("  {} could not save to {}", "x".red(), location);
        }
    }
}
