mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use clinical_analysis::{AnalysisConfig, RequestOrchestrator, SubmissionState};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::render::{render_analysis, render_error};

/// Submit a synthetic clinical note for analysis and print the summary
#[derive(Parser, Debug)]
#[command(name = "analysis-terminal", version)]
struct Args {
    /// Read the note from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Base URL of the analysis service (overrides ANALYSIS_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in milliseconds (overrides ANALYSIS_TIMEOUT_MS)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Also print the raw response payload as JSON
    #[arg(long)]
    raw: bool,
}

/// Initialize tracing on stderr; `LOG_FORMAT=pretty` for humans, JSON otherwise
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "analysis_terminal=info,clinical_analysis=info".into());

    match log_format.as_str() {
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}

fn build_config(args: &Args) -> Result<AnalysisConfig> {
    apply_overrides(AnalysisConfig::from_env()?, args)
}

/// Layer command-line flags over a base configuration
fn apply_overrides(mut config: AnalysisConfig, args: &Args) -> Result<AnalysisConfig> {
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(timeout_ms));
    }
    config.validate()?;
    Ok(config)
}

async fn read_note(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read note from {}", path.display())),
        None => {
            let mut note = String::new();
            tokio::io::stdin()
                .read_to_string(&mut note)
                .await
                .context("Failed to read note from stdin")?;
            Ok(note)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let args = Args::parse();
    let config = build_config(&args)?;
    info!(endpoint = %config.endpoint(), timeout_ms = config.timeout.as_millis() as u64, "Analysis terminal starting");

    let note = read_note(args.file.as_ref()).await?;
    let orchestrator = RequestOrchestrator::from_config(&config)?;

    // Progress indicator driven by state transitions
    let mut updates = orchestrator.subscribe();
    let progress = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            if updates.borrow_and_update().is_in_flight() {
                eprintln!("Analyzing...");
            }
        }
    });

    let settled = orchestrator.submit(&note).await;
    progress.abort();

    match settled? {
        SubmissionState::Succeeded(result) => {
            print!("{}", render_analysis(&result.analysis));
            if args.raw {
                println!();
                println!("{}", serde_json::to_string_pretty(&result.raw)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmissionState::Failed(error) => {
            eprint!("{}", render_error(&error));
            Ok(ExitCode::FAILURE)
        }
        other => anyhow::bail!("Submission ended in unexpected state: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configuration() {
        let args = Args::parse_from([
            "analysis-terminal",
            "--base-url",
            "http://analysis.internal:8080",
            "--timeout-ms",
            "2500",
        ]);
        let config = apply_overrides(AnalysisConfig::default(), &args).unwrap();

        assert_eq!(config.endpoint(), "http://analysis.internal:8080/analyze");
        assert_eq!(config.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn absent_flags_keep_base_configuration() {
        let base = AnalysisConfig::default()
            .with_base_url("https://notes.example.org")
            .with_timeout(Duration::from_millis(900));
        let args = Args::parse_from(["analysis-terminal"]);

        assert_eq!(apply_overrides(base.clone(), &args).unwrap(), base);
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        let args = Args::parse_from(["analysis-terminal", "--timeout-ms", "0"]);
        assert!(apply_overrides(AnalysisConfig::default(), &args).is_err());
    }
}
