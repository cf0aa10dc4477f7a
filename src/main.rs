//! Interactive operator CLI for shortvault.
//!
//! Drives the shortener store through a terminal menu: shorten a URL (with
//! an optional expiry offset in days), resolve a short code, inspect usage
//! statistics, and search stored links by URL substring.
//!
//! # Usage
//!
//! ```bash
//! # Start the menu with defaults (urlshortener.json in the working dir)
//! cargo run
//!
//! # Use a different data file and code length
//! cargo run -- --data-file /var/lib/shortvault/links.json --code-length 8
//! ```
//!
//! # Environment Variables
//!
//! - `DATA_FILE` - Path of the JSON data file (default: `urlshortener.json`)
//! - `CODE_LENGTH` - Generated short code length (default: 6)
//! - `MIRROR_ENDPOINT` / `MIRROR_BUCKET` - Enable remote mirroring
//! - `MIRROR_ACCESS_TOKEN` - Bearer token for the object store (optional)
//!
//! # Features
//!
//! - **Interactive Prompts**: menu loop with confirmation dialogs
//! - **Colored Output**: terminal-friendly formatting using `colored` crate
//! - **Remote Mirroring**: transparent when configured; every change is
//!   persisted locally and uploaded before the prompt returns

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use colored::*;
use dialoguer::{Confirm, Input, Select};
use tracing_subscriber::EnvFilter;

use shortvault::application::services::ShortenerStore;
use shortvault::config::{self, Config};
use shortvault::domain::entities::ShortUrlEntry;
use shortvault::infrastructure::mirror::{HttpMirror, NullMirror, RemoteMirror};
use shortvault::infrastructure::persistence::JsonFileStore;

/// Single-operator URL shortener with durable JSON persistence.
#[derive(Parser)]
#[command(name = "shortvault")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the JSON data file (overrides DATA_FILE)
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Generated short code length (overrides CODE_LENGTH)
    #[arg(long)]
    code_length: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if let Some(code_length) = cli.code_length {
        config.code_length = code_length;
    }
    config.validate()?;

    init_tracing(&config);
    config.print_summary();

    let mirror = select_mirror(&config);
    let persistence = JsonFileStore::new(config.data_file.clone());
    let mut store = ShortenerStore::new(persistence, mirror, config.code_length);

    store
        .load()
        .await
        .context("Failed to load the URL mapping")?;

    println!("{}", "shortvault".bright_blue().bold());
    println!("{} short link(s) loaded", store.len());

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Select an option")
            .items(&[
                "Shorten a URL",
                "Retrieve a URL",
                "View URL statistics",
                "Search by original URL",
                "Exit",
            ])
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => shorten_url(&mut store).await,
            1 => retrieve_url(&mut store).await,
            2 => view_stats(&store),
            3 => search_urls(&store),
            _ => break,
        };

        if let Err(e) = outcome {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber with the configured filter and format.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Picks the mirror variant once at startup.
///
/// The store itself never checks whether mirroring is on; it just drives
/// whichever implementation it was handed.
fn select_mirror(config: &Config) -> Arc<dyn RemoteMirror> {
    match (&config.mirror_endpoint, &config.mirror_bucket) {
        (Some(endpoint), Some(bucket)) => Arc::new(HttpMirror::new(
            endpoint,
            bucket,
            config.mirror_access_token.clone(),
        )),
        _ => Arc::new(NullMirror::new()),
    }
}

/// Prompts for a URL and an optional expiry, then creates the short link.
async fn shorten_url(store: &mut ShortenerStore) -> Result<()> {
    let url: String = Input::new()
        .with_prompt("Original URL")
        .interact_text()?;

    let expires_at = if Confirm::new()
        .with_prompt("Set an expiry?")
        .default(false)
        .interact()?
    {
        let days: i64 = Input::new()
            .with_prompt("Expiry in days from now")
            .with_initial_text("30")
            .interact_text()?;
        Some(Utc::now() + Duration::days(days))
    } else {
        None
    };

    let code = store.shorten_url(url, expires_at).await?;
    println!("{} {}", "Short code:".green().bold(), code);
    Ok(())
}

/// Resolves a short code, counting the access.
async fn retrieve_url(store: &mut ShortenerStore) -> Result<()> {
    let code: String = Input::new().with_prompt("Short code").interact_text()?;

    match store.retrieve_url(code.trim(), Utc::now()).await? {
        Some(url) => println!("{} {}", "Original URL:".green().bold(), url),
        None => println!("{}", "Short code not found or expired.".yellow()),
    }

    Ok(())
}

/// Shows the stored entry for a short code without touching it.
fn view_stats(store: &ShortenerStore) -> Result<()> {
    let code: String = Input::new().with_prompt("Short code").interact_text()?;

    match store.get_stats(code.trim()) {
        Some(entry) => print_entry(entry),
        None => println!("{}", "Short code not found.".yellow()),
    }

    Ok(())
}

/// Lists all entries whose original URL contains the given substring.
fn search_urls(store: &ShortenerStore) -> Result<()> {
    let needle: String = Input::new()
        .with_prompt("URL substring")
        .interact_text()?;

    let matches = store.find_by_original_url(needle.trim());
    if matches.is_empty() {
        println!("{}", "No matching links.".yellow());
        return Ok(());
    }

    println!("{} match(es):", matches.len());
    for entry in &matches {
        println!();
        print_entry(entry);
    }

    Ok(())
}

fn print_entry(entry: &ShortUrlEntry) {
    println!("  {} {}", "Short code:".bold(), entry.short_code);
    println!("  {} {}", "Original URL:".bold(), entry.original_url);
    println!("  {} {}", "Access count:".bold(), entry.access_count);
    match entry.expires_at {
        Some(expiry) => println!(
            "  {} {}",
            "Expires at:".bold(),
            expiry.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => println!("  {} never", "Expires at:".bold()),
    }
}
