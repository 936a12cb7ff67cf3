use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use survey_insights_cli::config;
use survey_insights_cli::output::{OutputFormat, OutputWriter};
use survey_insights_core::SurveyAnalysisRequest;
use survey_insights_engine::AnalyticsOrchestrator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "survey-insights", version, about = "Statistical and text insights for survey responses")]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a survey request JSON file
    Analyze {
        /// Path to the request file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Commands::Analyze { file } => analyze(&file, OutputWriter::new(cli.format, cli.no_color)).await,
    }
}

fn init_tracing(json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "survey_insights=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn analyze(file: &Path, output: OutputWriter) -> Result<()> {
    let engine_config = config::load()?;
    tracing::debug!(?engine_config, "Configuration loaded");

    let body = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let request = SurveyAnalysisRequest::from_json(&body)
        .with_context(|| format!("invalid request in {}", file.display()))?;

    let orchestrator = AnalyticsOrchestrator::new(engine_config)?;
    let report = orchestrator.analyze(&request).await?;
    output.write(&report)
}
