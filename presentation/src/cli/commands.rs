//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for prediction and info results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with both strategies' rankings
    Full,
    /// Only the final disease and confidence
    Short,
    /// JSON output
    Json,
}

/// CLI arguments for symptom-triage
#[derive(Parser, Debug)]
#[command(name = "symptom-triage")]
#[command(author, version, about = "Hybrid disease triage from reported symptoms")]
#[command(long_about = r#"
symptom-triage suggests a likely disease for a set of reported symptoms.

Two strategies run side by side:
1. Statistical: a Naive Bayes model trained on recorded examples
2. Rule-based: overlap scoring against a fixed disease catalogue

The rule-based result is used whenever the model is untrained or its
confidence falls below the fallback threshold.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. TRIAGE_* environment variables
3. ./triage.toml       Project-level config
4. ~/.config/symptom-triage/config.toml   Global config

Example:
  symptom-triage predict fever cough body_ache
  symptom-triage predict nausea,vomiting -o json
  symptom-triage record "Stomach Flu" nausea diarrhea
  symptom-triage retrain
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Suggest a disease for the given symptoms
    Predict {
        /// Symptom tokens, space or comma separated (e.g. fever cough)
        #[arg(value_name = "SYMPTOM", value_delimiter = ',')]
        symptoms: Vec<String>,

        /// Record the result as a training example
        #[arg(long)]
        record: bool,
    },

    /// Record a confirmed diagnosis as a training example
    Record {
        /// Disease label (e.g. "Common Cold")
        disease: String,

        /// Symptom tokens, space or comma separated
        #[arg(value_name = "SYMPTOM", required = true, value_delimiter = ',')]
        symptoms: Vec<String>,

        /// Confidence in the label, between 0 and 1
        #[arg(long, default_value_t = 1.0)]
        confidence: f64,
    },

    /// Rebuild the statistical model from all recorded examples
    Retrain {
        /// Do not write the new model to disk
        #[arg(long)]
        no_save: bool,
    },

    /// Show model and training data status
    Info,

    /// List the diseases and symptoms the rules know about
    Catalogue,

    /// Write every training example as a JSON array
    Export {
        /// Destination file (stdout when omitted)
        path: Option<PathBuf>,
    },
}
