// In app/src/main.rs

use std::path::{Path, PathBuf};

use analytics::AnalyticsEngine;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use core_types::Journal;
use serde::Serialize;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Process and psychology analytics for a trading journal export.")]
struct Cli {
    /// Path to the journal JSON. Defaults to `journal.path` from the settings.
    #[arg(short, long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints the quantitative metrics (DQI, EIS, SRC, SPS and the composite grade).
    Metrics,

    /// Prints the psychological profile.
    Profile,

    /// Prints the dashboard aggregates.
    Dashboard {
        /// Restrict every section except the session table to one session.
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Prints metrics, profile and dashboard as one document.
    Report {
        #[arg(short, long)]
        session: Option<String>,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let settings = app_config::load_settings().context("Failed to load application settings")?;

    // Logs go to stderr so stdout stays valid JSON.
    let level = settings.app.log_level.parse().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    let cli = Cli::parse();
    tracing::info!(environment = %settings.app.environment, "Starting journal analytics.");

    let path = cli.journal.unwrap_or_else(|| settings.journal.path.clone());
    let journal = load_journal(&path)?;
    tracing::info!(
        path = %path.display(),
        trades = journal.trades.len(),
        sessions = journal.sessions.len(),
        strategies = journal.strategies.len(),
        "Journal loaded."
    );

    let engine = AnalyticsEngine::with_settings(settings.analytics.clone());

    match cli.command {
        Commands::Metrics => print_json(&engine.quantitative(&journal))?,
        Commands::Profile => {
            let report = engine
                .profile(&journal)
                .context("Cannot build a psychological profile")?;
            print_json(&report)?;
        }
        Commands::Dashboard { session } => print_json(&engine.dashboard(&journal, session.as_deref()))?,
        Commands::Report { session } => print_json(&engine.full_report(&journal, session.as_deref()))?,
    }

    tracing::info!("Journal analytics finished successfully.");
    Ok(())
}

fn load_journal(path: &Path) -> Result<Journal> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal at {}", path.display()))?;
    let journal = Journal::from_json(&content)
        .with_context(|| format!("Failed to parse journal at {}", path.display()))?;
    if journal.is_empty() {
        tracing::warn!(path = %path.display(), "Journal has no trades; every metric will be zero.");
    }
    Ok(journal)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
