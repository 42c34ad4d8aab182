//! Strictly Cricket - Unified CLI
//!
//! Terminal scorer and settings management.

#![warn(missing_docs)]

mod cli;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, SettingsAction};
use strictly_cricket::{OutputFormat, OverNotifier, Scorer, ScoringEngine, Settings};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the scorecard
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Score {
            balls_per_over,
            json,
            notify_ms,
        } => run_scorer(&cli.settings, balls_per_over, json, notify_ms).await,
        Command::Settings { action } => run_settings(&cli.settings, action),
    }
}

/// Run the interactive scorer on stdin/stdout
#[instrument(skip(settings_path), fields(settings = %settings_path.display()))]
async fn run_scorer(
    settings_path: &Path,
    balls_per_over: u32,
    json: bool,
    notify_ms: u64,
) -> Result<()> {
    let settings = Settings::load(settings_path)?;
    let engine = ScoringEngine::with_balls_per_over(balls_per_over)?;
    let notifier = OverNotifier::new(Duration::from_millis(notify_ms));
    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    info!(overs_per_innings = ?settings.overs_per_innings(), "Starting scorer");
    let mut scorer = Scorer::new(engine, notifier)
        .with_overs_per_innings(*settings.overs_per_innings())
        .with_format(format);

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    scorer.run(input, &mut output).await
}

/// Show or update the settings file
#[instrument(skip(settings_path), fields(settings = %settings_path.display()))]
fn run_settings(settings_path: &Path, action: SettingsAction) -> Result<()> {
    let mut settings = Settings::load(settings_path)?;

    match action {
        SettingsAction::Show => {}
        SettingsAction::SetOvers { overs } => {
            settings.set_overs_per_innings(overs)?;
            settings.save(settings_path)?;
        }
        SettingsAction::ClearOvers => {
            settings.clear_overs_per_innings();
            settings.save(settings_path)?;
        }
    }

    match settings.overs_per_innings() {
        Some(overs) => println!("Overs per innings: {}", overs),
        None => println!("Overs per innings: unlimited"),
    }
    Ok(())
}
