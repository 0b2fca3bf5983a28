//! Output formatter trait

use triage_application::PredictionExplanation;

/// Trait for formatting prediction results
pub trait OutputFormatter {
    /// Format the prediction with both strategies' rankings
    fn format(&self, explanation: &PredictionExplanation) -> String;

    /// Format as JSON
    fn format_json(&self, explanation: &PredictionExplanation) -> String;

    /// Format the final result only (concise output)
    fn format_short(&self, explanation: &PredictionExplanation) -> String;
}
