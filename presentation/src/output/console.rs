//! Console output formatter for triage results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use serde_json::json;
use triage_application::{
    BootstrapReport, EngineInfo, PredictionExplanation, RetrainOutput, SubmitOutput,
};
use triage_domain::{DiseaseCatalogue, FallbackReason, PredictionResult, SymptomSet};

/// Rows shown per ranking in the full view
const RANKING_ROWS: usize = 5;

/// Formats triage results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete prediction
    pub fn format(explanation: &PredictionExplanation) -> String {
        let mut output = String::new();
        let result = &explanation.arbitration.result;

        output.push_str(&Self::header("Triage Result"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Suggestion:".cyan().bold(),
            Self::disease(result)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Confidence:".cyan().bold(),
            Self::confidence(result.confidence)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Source:".cyan().bold(),
            result.source
        ));

        if let Some(reason) = &explanation.arbitration.fallback {
            output.push_str(&format!(
                "{} {}\n",
                "Fallback:".yellow().bold(),
                Self::fallback_reason(reason)
            ));
        }

        if !explanation.model_ranking.is_empty() {
            output.push_str(&Self::section_header("Statistical model"));
            for (disease, p) in explanation.model_ranking.iter().take(RANKING_ROWS) {
                output.push_str(&format!("  {:<20} {}\n", disease, Self::confidence(*p)));
            }
        }

        let matched: Vec<_> = explanation
            .rule_candidates
            .iter()
            .filter(|c| c.matched > 0)
            .take(RANKING_ROWS)
            .collect();
        if !matched.is_empty() {
            output.push_str(&Self::section_header("Rule-based matches"));
            for candidate in matched {
                output.push_str(&format!(
                    "  {:<20} {} ({}/{} symptoms)\n",
                    candidate.disease,
                    Self::confidence(candidate.confidence),
                    candidate.matched,
                    candidate.profile_size
                ));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(explanation: &PredictionExplanation) -> String {
        let result = &explanation.arbitration.result;
        let value = json!({
            "disease": result.disease,
            "confidence": result.confidence,
            "source": result.source,
            "fallback": explanation.arbitration.fallback,
            "model_ranking": explanation
                .model_ranking
                .iter()
                .map(|(disease, p)| json!({ "disease": disease, "probability": p }))
                .collect::<Vec<_>>(),
            "rule_candidates": explanation.rule_candidates,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final result only (concise output)
    pub fn format_short(explanation: &PredictionExplanation) -> String {
        let result = &explanation.arbitration.result;
        format!(
            "{} ({}%)",
            Self::disease(result),
            result.confidence_percent()
        )
    }

    pub fn format_info(info: &EngineInfo) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Engine Status"));
        output.push('\n');

        let model = if info.model_trained {
            format!("trained (generation {})", info.generation).green()
        } else {
            "not trained, rule-based only".yellow()
        };
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), model));

        if info.model_trained {
            output.push_str(&format!(
                "{} {} examples, {} symptoms in vocabulary\n",
                "Trained on:".cyan().bold(),
                info.trained_on,
                info.vocabulary_size
            ));
            if let Some(at) = info.trained_at {
                output.push_str(&format!(
                    "{} {}\n",
                    "Trained at:".cyan().bold(),
                    at.format("%Y-%m-%d %H:%M:%S UTC")
                ));
            }
            output.push_str(&format!(
                "{} {}\n",
                "Classes:".cyan().bold(),
                info.classes.join(", ")
            ));
        }

        output.push_str(&format!(
            "{} {}\n",
            "Training log:".cyan().bold(),
            info.training_examples
        ));
        output.push_str(&format!(
            "{} {} diseases\n",
            "Catalogue:".cyan().bold(),
            info.catalogue_size
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Fallback below:".cyan().bold(),
            info.fallback_threshold
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Model file:".dimmed(),
            info.model_location
        ));
        output.push_str(&Self::footer());
        output
    }

    pub fn format_info_json(info: &EngineInfo) -> String {
        serde_json::to_string_pretty(info).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_catalogue(catalogue: &DiseaseCatalogue) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Disease Catalogue"));
        output.push('\n');
        for profile in catalogue.iter() {
            let symptoms: Vec<&str> = profile.symptoms().iter().map(|s| s.as_str()).collect();
            output.push_str(&format!(
                "{} {}\n    {}\n",
                format!("{:<20}", profile.name()).yellow().bold(),
                format!("weight {:.2}", profile.weight()).dimmed(),
                symptoms.join(", ")
            ));
        }
        output.push_str(&Self::footer());
        output
    }

    pub fn format_catalogue_json(catalogue: &DiseaseCatalogue) -> String {
        let profiles: Vec<_> = catalogue.iter().collect();
        serde_json::to_string_pretty(&profiles).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn format_submit(output: &SubmitOutput, disease: &str) -> String {
        let mut text = format!(
            "{} Recorded '{}' as training example #{}",
            "v".green(),
            disease,
            output.position + 1
        );
        if !output.in_catalogue {
            text.push_str(&format!(
                "\n{} '{}' is not in the catalogue; only the statistical model will learn it",
                "!".yellow(),
                disease
            ));
        }
        if !output.journaled {
            text.push_str(&format!(
                "\n{} The example was not written to the journal and will be lost on exit",
                "!".yellow()
            ));
        }
        if output.retrain_due {
            text.push_str(&format!(
                "\n{} Enough new examples: run `symptom-triage retrain`",
                "->".cyan()
            ));
        }
        text
    }

    pub fn format_retrain(output: &RetrainOutput) -> String {
        let mut text = format!(
            "{} Model generation {} trained on {} examples ({} classes)",
            "v".green(),
            output.generation,
            output.model.trained_on,
            output.model.classes().len()
        );
        if let Some(error) = &output.save_error {
            text.push_str(&format!("\n{} Not saved: {}", "x".red(), error));
        } else if output.saved {
            text.push_str(&format!("\n{} Saved", "v".green()));
        }
        text
    }

    pub fn format_bootstrap(report: &BootstrapReport) -> String {
        format!(
            "{} {} journaled + {} seed examples, model {}",
            "Loaded".dimmed(),
            report.examples_loaded,
            report.seeded,
            report.model_source
        )
    }

    /// Warning line for tokens outside the known vocabulary
    pub fn format_unknown_tokens(symptoms: &SymptomSet) -> Option<String> {
        let unknown: Vec<&str> = symptoms.unknown_tokens().map(|t| t.as_str()).collect();
        if unknown.is_empty() {
            return None;
        }
        Some(format!(
            "{} Unrecognised symptom(s): {}",
            "!".yellow(),
            unknown.join(", ")
        ))
    }

    fn disease(result: &PredictionResult) -> String {
        if result.is_healthy() {
            result.disease.green().bold().to_string()
        } else if result.is_unknown() {
            result.disease.dimmed().bold().to_string()
        } else {
            result.disease.yellow().bold().to_string()
        }
    }

    fn confidence(value: f64) -> String {
        format!("{:>5.1}%", value * 100.0)
    }

    fn fallback_reason(reason: &FallbackReason) -> String {
        match reason {
            FallbackReason::ModelNotTrained => "statistical model not trained".to_string(),
            FallbackReason::NoKnownSymptoms => "no symptom known to the model".to_string(),
            FallbackReason::LowConfidence {
                disease,
                confidence,
            } => format!(
                "model suggested {} at {:.1}%, below threshold",
                disease,
                confidence * 100.0
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, explanation: &PredictionExplanation) -> String {
        Self::format(explanation)
    }

    fn format_json(&self, explanation: &PredictionExplanation) -> String {
        Self::format_json(explanation)
    }

    fn format_short(&self, explanation: &PredictionExplanation) -> String {
        Self::format_short(explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_domain::{Arbitration, PredictionSource, RuleCandidate};

    fn explanation(result: PredictionResult, fallback: Option<FallbackReason>) -> PredictionExplanation {
        PredictionExplanation {
            arbitration: Arbitration { result, fallback },
            rule_candidates: vec![RuleCandidate {
                disease: "Pneumonia".to_string(),
                matched: 2,
                profile_size: 4,
                confidence: 0.57,
            }],
            model_ranking: vec![("Flu".to_string(), 0.246), ("Pneumonia".to_string(), 0.2)],
        }
    }

    fn pneumonia() -> PredictionExplanation {
        explanation(
            PredictionResult::new("Pneumonia", 0.57, PredictionSource::RuleExact),
            Some(FallbackReason::LowConfidence {
                disease: "Flu".to_string(),
                confidence: 0.246,
            }),
        )
    }

    #[test]
    fn test_short_format() {
        colored::control::set_override(false);
        assert_eq!(ConsoleFormatter::format_short(&pneumonia()), "Pneumonia (57%)");
    }

    #[test]
    fn test_full_format_mentions_fallback_and_rankings() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&pneumonia());
        assert!(text.contains("Suggestion: Pneumonia"));
        assert!(text.contains("model suggested Flu at 24.6%"));
        assert!(text.contains("Statistical model"));
        assert!(text.contains("(2/4 symptoms)"));
    }

    #[test]
    fn test_json_format() {
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&pneumonia())).unwrap();
        assert_eq!(value["disease"], "Pneumonia");
        assert_eq!(value["source"], "rule_exact");
        assert_eq!(value["fallback"]["reason"], "low_confidence");
        assert_eq!(value["model_ranking"][0]["disease"], "Flu");
        assert_eq!(value["rule_candidates"][0]["matched"], 2);
    }

    #[test]
    fn test_json_healthy_has_no_fallback() {
        let value: serde_json::Value = serde_json::from_str(&ConsoleFormatter::format_json(
            &explanation(PredictionResult::healthy(), None),
        ))
        .unwrap();
        assert_eq!(value["disease"], "Healthy");
        assert_eq!(value["confidence"], 1.0);
        assert!(value["fallback"].is_null());
    }

    #[test]
    fn test_unknown_tokens_warning() {
        colored::control::set_override(false);
        let known = SymptomSet::from_tokens(["fever"]);
        assert!(ConsoleFormatter::format_unknown_tokens(&known).is_none());

        let mixed = SymptomSet::from_tokens(["fever", "itching"]);
        assert_eq!(
            ConsoleFormatter::format_unknown_tokens(&mixed).unwrap(),
            "! Unrecognised symptom(s): itching"
        );
    }

    #[test]
    fn test_catalogue_json_lists_every_profile() {
        let catalogue = DiseaseCatalogue::standard();
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_catalogue_json(&catalogue)).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 8);
    }
}
