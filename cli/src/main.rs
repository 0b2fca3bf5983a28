//! CLI entrypoint for symptom-triage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use triage_application::{
    EngineConfig, ModelSource, NoTrainingJournal, RetrainInput, SubmitTrainingInput,
    TrainingJournal, TriageEngine,
};
use triage_domain::{DiseaseCatalogue, SymptomSet};
use triage_infrastructure::{ConfigLoader, FileConfig, JsonModelStore, JsonlTrainingJournal};
use triage_presentation::{Cli, Command, ConsoleFormatter, OutputFormat, ProgressMode};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!(e))?
    };

    // Initialize logging based on verbosity level, then the config file
    let (configured_level, _) = file_config.logging.parse_level();
    let filter = match cli.verbose {
        0 => EnvFilter::new(configured_level.as_deref().unwrap_or("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    for issue in file_config.check()? {
        warn!("{}", issue);
    }

    info!("Starting symptom-triage");

    // === Dependency Injection ===
    let engine = Arc::new(build_engine(&file_config, file_config.to_engine_config()));
    let report = engine.start().await;
    if !cli.quiet && cli.verbose > 0 {
        eprintln!("{}", ConsoleFormatter::format_bootstrap(&report));
    }

    let mut model_changed = report.model_source == ModelSource::Trained;

    match command {
        Command::Predict { symptoms, record } => {
            let symptoms = SymptomSet::from_tokens(&symptoms);
            warn_unknown(&symptoms, cli.quiet);

            let explanation = engine.explain(&symptoms);
            if record && !engine.config().record_predictions {
                engine.record_prediction(&symptoms, &explanation.arbitration.result);
            }

            let output = match cli.output {
                OutputFormat::Full => ConsoleFormatter::format(&explanation),
                OutputFormat::Short => ConsoleFormatter::format_short(&explanation),
                OutputFormat::Json => ConsoleFormatter::format_json(&explanation),
            };
            println!("{}", output);
        }

        Command::Record {
            disease,
            symptoms,
            confidence,
        } => {
            if disease.trim().is_empty() {
                bail!("Disease label cannot be empty");
            }
            if !(0.0..=1.0).contains(&confidence) {
                bail!("Confidence must be between 0 and 1, got {}", confidence);
            }
            let symptoms = SymptomSet::try_from_tokens(&symptoms)?;
            warn_unknown(&symptoms, cli.quiet);

            let output = engine.submit_training_example(SubmitTrainingInput::new(
                symptoms,
                disease.trim(),
                confidence,
            ));
            println!("{}", ConsoleFormatter::format_submit(&output, disease.trim()));

            if output.retrain_due
                && let Some(retrained) = engine.retrain_if_due(cancel_on_ctrl_c()).await
            {
                match retrained {
                    Ok(output) => {
                        model_changed = true;
                        println!("{}", ConsoleFormatter::format_retrain(&output));
                    }
                    Err(e) => warn!("Automatic retrain failed: {}", e),
                }
            }
        }

        Command::Retrain { no_save } => {
            let mut input = RetrainInput::new().with_cancellation(cancel_on_ctrl_c());
            if !no_save {
                input = input.persisted();
            }

            let progress =
                ProgressMode::detect(cli.quiet, std::io::stderr().is_terminal()).reporter();

            let output = engine
                .retrain_model_with_progress(input, progress.as_ref())
                .await?;
            println!("{}", ConsoleFormatter::format_retrain(&output));
            model_changed = false;
        }

        Command::Info => {
            let info = engine.info();
            let output = match cli.output {
                OutputFormat::Json => ConsoleFormatter::format_info_json(&info),
                _ => ConsoleFormatter::format_info(&info),
            };
            println!("{}", output);
        }

        Command::Catalogue => {
            let catalogue = engine.knowledge().catalogue();
            let output = match cli.output {
                OutputFormat::Json => ConsoleFormatter::format_catalogue_json(catalogue),
                _ => ConsoleFormatter::format_catalogue(catalogue),
            };
            println!("{}", output);
        }

        Command::Export { path } => {
            let examples = engine.export_examples();
            let json = serde_json::to_string_pretty(&examples)?;
            match path {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    if !cli.quiet {
                        eprintln!("Exported {} examples to {}", examples.len(), path.display());
                    }
                }
                None => println!("{}", json),
            }
        }
    }

    if model_changed {
        engine.shutdown().await;
    }

    Ok(())
}

fn build_engine(file_config: &FileConfig, config: EngineConfig) -> TriageEngine {
    let model_path = file_config.storage.resolved_model_path();
    let journal_path = file_config.storage.resolved_journal_path();

    let store = Arc::new(JsonModelStore::new(model_path));
    let journal: Arc<dyn TrainingJournal> = match JsonlTrainingJournal::open(&journal_path) {
        Ok(journal) => Arc::new(journal),
        Err(e) => {
            warn!("Training journal unavailable, examples will not persist: {}", e);
            Arc::new(NoTrainingJournal)
        }
    };

    TriageEngine::new(DiseaseCatalogue::standard(), config, store, journal)
}

/// Token cancelled by the first Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            child.cancel();
        }
    });
    token
}

fn warn_unknown(symptoms: &SymptomSet, quiet: bool) {
    if let Some(message) = ConsoleFormatter::format_unknown_tokens(symptoms) {
        warn!("{}", message);
        if !quiet {
            eprintln!("{}", message);
        }
    }
}
