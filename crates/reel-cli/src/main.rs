//! `reel` — track movies and TV shows from the terminal.
//!
//! Search an external catalog, add titles to a personal library, and record
//! watch status, rating, and progress. All state lives in a local SQLite
//! file; the only network access is the catalog lookup.
//!
//! # Usage
//!
//! ```
//! reel search "dune"
//! reel add tt1160419 --status watchlist
//! reel update 1 --status watching --progress "part one"
//! reel stats
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use reel_core::{entry::WatchStatus, item::TitleKind};
use reel_omdb::OmdbClient;
use reel_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use config::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "reel", about = "Track movies and TV shows from the terminal")]
struct Cli {
  /// Path to a TOML config file (api_key, db_path).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Path to the library database.
  #[arg(long, env = "REEL_DB", global = true, value_name = "FILE")]
  db: Option<PathBuf>,

  /// OMDb API key.
  #[arg(long, env = "REEL_OMDB_API_KEY", global = true, value_name = "KEY")]
  api_key: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Search the remote catalog for a title.
  Search {
    query: String,
  },

  /// Fetch a title by external id and add it to the library.
  Add {
    /// External catalog id, e.g. tt1160419.
    id: String,

    /// Initial watch status.
    #[arg(long, value_parser = parse_status, default_value = "watchlist")]
    status: WatchStatus,
  },

  /// Add a title by hand, without touching the remote catalog.
  AddManual {
    #[arg(long)]
    title: String,

    /// Release year, free-form (ranges like 2015–2019 are fine).
    #[arg(long)]
    year: String,

    /// movie | series
    #[arg(long, value_parser = parse_kind)]
    kind: TitleKind,

    /// Initial watch status.
    #[arg(long, value_parser = parse_status, default_value = "watchlist")]
    status: WatchStatus,
  },

  /// List the library, most recently added first.
  List {
    /// Restrict to one watch status.
    #[arg(long, value_parser = parse_status)]
    status: Option<WatchStatus>,
  },

  /// Change status, rating, review, or progress on an entry.
  Update {
    /// Entry id, as shown by `reel list`.
    id: i64,

    /// New watch status. `completed` also stamps the completion date.
    #[arg(long, value_parser = parse_status)]
    status: Option<WatchStatus>,

    /// Personal rating, 1–10.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    rating: Option<u8>,

    #[arg(long)]
    review: Option<String>,

    /// Free-form progress marker, e.g. "s02e04" or "40%".
    #[arg(long)]
    progress: Option<String>,

    #[arg(long, conflicts_with = "rating")]
    clear_rating: bool,

    #[arg(long, conflicts_with = "review")]
    clear_review: bool,

    #[arg(long, conflicts_with = "progress")]
    clear_progress: bool,
  },

  /// Delete an entry from the library. The catalog item stays.
  Remove {
    id: i64,
  },

  /// Aggregate library statistics.
  Stats,
}

fn parse_status(s: &str) -> Result<WatchStatus, String> {
  WatchStatus::parse(s).map_err(|e| e.to_string())
}

fn parse_kind(s: &str) -> Result<TitleKind, String> {
  TitleKind::parse(s).map_err(|e| e.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::resolve(
    cli.config.as_deref(),
    cli.db.clone(),
    cli.api_key.clone(),
  )?;

  if let Some(parent) = settings.db_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating {}", parent.display()))?;
  }
  let store = SqliteStore::open(&settings.db_path)
    .await
    .context("opening library database")?;

  match cli.command {
    Command::Search { query } => {
      commands::search(&remote(&settings)?, &query).await
    }
    Command::Add { id, status } => {
      commands::add(&store, &remote(&settings)?, &id, status).await
    }
    Command::AddManual { title, year, kind, status } => {
      commands::add_manual(&store, title, year, kind, status).await
    }
    Command::List { status } => commands::list(&store, status).await,
    Command::Update {
      id,
      status,
      rating,
      review,
      progress,
      clear_rating,
      clear_review,
      clear_progress,
    } => {
      let patch = commands::build_patch(
        status,
        rating,
        review,
        progress,
        clear_rating,
        clear_review,
        clear_progress,
      );
      commands::update(&store, id, patch).await
    }
    Command::Remove { id } => commands::remove(&store, id).await,
    Command::Stats => commands::stats(&store).await,
  }
}

/// Build the lookup client; only remote subcommands require an API key.
fn remote(settings: &Settings) -> Result<OmdbClient> {
  let key = settings.api_key.as_deref().context(
    "no OMDb API key configured; pass --api-key, set REEL_OMDB_API_KEY, \
     or put api_key in the config file",
  )?;
  Ok(OmdbClient::new(key)?)
}
