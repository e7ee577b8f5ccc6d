//! Diagnosis Engine - terminal front-end.
//!
//! Loads configuration from the environment, reads the knowledge base from
//! disk and runs an interactive questionnaire on stdin/stdout.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use diagnosis_engine::adapters::{Console, FileKnowledgeBase};
use diagnosis_engine::application::StartDiagnosisHandler;
use diagnosis_engine::config::{AppConfig, DataConfig, LoggingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "diagnosis-engine",
    version,
    about = "Ranks likely diagnoses by asking the most informative question next."
)]
struct Args {
    /// Enable debug logging for the engine (same as AIVO__LOGGING__DEBUG=true).
    #[arg(long)]
    debug: bool,
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn knowledge_base(data: &DataConfig) -> FileKnowledgeBase {
    match data.directory_only() {
        Some(dir) => FileKnowledgeBase::from_dir(dir),
        None => FileKnowledgeBase::new(data.questions_path(), data.candidates_path(), data.model_path()),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load()?;
    config.logging.debug |= args.debug;
    config.validate()?;
    init_tracing(&config.logging);

    let handler = StartDiagnosisHandler::new(Arc::new(knowledge_base(&config.data)));
    let started = match handler.handle().await {
        Ok(started) => started,
        Err(err) => {
            tracing::error!(code = %err.code, details = ?err.details, "failed to start diagnosis");
            eprintln!("{}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let stdin = io::stdin();
    Console::new(
        started.session,
        &started.catalog,
        config.session.clone(),
        stdin.lock(),
        io::stdout(),
    )
    .run()?;

    Ok(ExitCode::SUCCESS)
}
