// ABOUTME: Command-line entry point for syncing workouts and printing cache statistics
// ABOUTME: `refresh` pulls new workouts into the cache, `stats` analyses what is cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Sync everything newer than the newest cached workout
//! PELOTON_USERNAME=me PELOTON_PASSWORD=... PELOTON_DATA_CACHE_DIR=~/.peloton pelosync refresh
//!
//! # Streaks and year-end projection from the cache
//! PELOTON_DATA_CACHE_DIR=~/.peloton pelosync stats
//!
//! # Same, as JSON
//! PELOTON_DATA_CACHE_DIR=~/.peloton pelosync stats --json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pelosync::config::SyncConfig;
use pelosync::logging::LoggingConfig;
use pelosync::sync::{SyncEngine, WorkoutSummary};
use pelosync_intelligence::Analysis;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pelosync",
    about = "Peloton workout sync and statistics",
    long_about = "Incrementally caches workout history as JSON files and derives streak and year-end statistics from the cache."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Fetch workouts newer than the newest cached one
    Refresh,
    /// Print statistics computed from the cache
    Stats {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SyncConfig::from_env().context("invalid PELOTON_* configuration")?;

    let refreshing = matches!(cli.command, Command::Refresh);
    LoggingConfig::from_env(LoggingConfig::default_level(refreshing, config.ignore_warnings)).init()?;

    match cli.command {
        Command::Refresh => refresh(&config).await,
        Command::Stats { json } => stats(&config, json),
    }
}

async fn refresh(config: &SyncConfig) -> Result<()> {
    let engine = SyncEngine::new(config.connect().context("failed to build HTTP client")?);
    let summaries = engine.refresh().await.context("refresh failed")?;
    for summary in &summaries {
        println!("{}", format_summary(summary));
    }
    info!(synced = summaries.len(), "refresh complete");
    Ok(())
}

fn stats(config: &SyncConfig, json: bool) -> Result<()> {
    let analysis = config
        .analysis_engine()
        .analyze()
        .context("failed to analyse cached data")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

fn format_summary(summary: &WorkoutSummary) -> String {
    let start = summary
        .start_time
        .map_or_else(|| "unknown start".to_owned(), |start| start.format("%Y-%m-%d %H:%M %:z").to_string());
    format!("{start}  {}  ({})", summary.title, summary.instructor)
}

fn print_analysis(analysis: &Analysis) {
    println!("As of:                {}", analysis.as_of);
    println!("Accumulated minutes:  {:.0}", analysis.accumulated_minutes);
    println!("End-of-year estimate: {:.0}", analysis.eoy_estimate);
    println!("Daily streak:         {}", analysis.current_daily_streak);
    println!("Weekly streak:        {}", analysis.current_weekly_streak);
}
