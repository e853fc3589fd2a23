//! reelscore command line.
//!
//! `reelscore scrape` looks every title up on IMDb, Rotten Tomatoes and
//! Metacritic, merges the results and replaces the dataset file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reelscore_client::{Aggregator, FetchClient, FetchConfig, SiteUrls};
use reelscore_core::{AppConfig, WriteOutcome, write_dataset};

#[derive(Debug, Parser)]
#[command(name = "reelscore", about = "Scrape movie scores into a JSON dataset")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape titles and write the dataset
    Scrape {
        /// Titles to look up (default: the configured titles)
        titles: Vec<String>,
        /// Dataset path (default: the configured dataset_path)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only query IMDb; skip Rotten Tomatoes and Metacritic
        #[arg(long)]
        imdb_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    match cli.command {
        Commands::Scrape { titles, output, imdb_only } => {
            let titles = if titles.is_empty() { config.titles.clone() } else { titles };
            let output = output.unwrap_or_else(|| config.dataset_path.clone());
            scrape(&config, &titles, &output, imdb_only).await
        }
    }
}

async fn scrape(config: &AppConfig, titles: &[String], output: &Path, imdb_only: bool) -> Result<()> {
    if titles.is_empty() {
        anyhow::bail!("no titles to scrape; pass titles or set REELSCORE_TITLES");
    }

    let t0 = Instant::now();
    let fetcher = Arc::new(FetchClient::new(FetchConfig::from(config))?);
    let urls = SiteUrls::from_config(config)?;

    let mut aggregator = Aggregator::new(fetcher, urls);
    if imdb_only {
        aggregator = aggregator.imdb_only();
    }

    println!("Scraping {} movies...", titles.len());
    let records = aggregator.aggregate(titles).await;

    let outcome = write_dataset(output, &records)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;

    match outcome {
        WriteOutcome::Written { path, count } => {
            tracing::info!(count, requested = titles.len(), path = %path.display(), "dataset written");
            println!("Wrote {} of {} movies to {} in {:.1?}", count, titles.len(), path.display(), t0.elapsed());
        }
        WriteOutcome::Skipped { count } => {
            tracing::warn!(count, path = %output.display(), "too few movies scraped, dataset left unchanged");
            println!("Only {} movie(s) scraped; left {} unchanged", count, output.display());
        }
    }

    Ok(())
}
