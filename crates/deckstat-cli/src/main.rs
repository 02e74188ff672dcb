//! Command-line deck statistics for Anki.
//!
//! Prints new, total and seen card counts for a deck, read from a running
//! Anki through AnkiConnect or from the collection file while Anki is closed.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use deckstat::{Mode, Stats};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status when a count could not be produced.
const NO_RESULT: u8 = 2;

// ============================================================================
// CLI Arguments
// ============================================================================

/// New, total and seen card counts for Anki decks.
#[derive(Parser, Debug)]
#[command(name = "deckstat")]
#[command(version, about, long_about = None)]
struct Args {
    /// AnkiConnect host address
    #[arg(long, default_value = "127.0.0.1", global = true)]
    host: String,

    /// AnkiConnect port
    #[arg(long, default_value_t = 8765, global = true)]
    port: u16,

    /// AnkiConnect API key, if the add-on requires one
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// AnkiConnect request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    /// Anki profile whose collection is read offline
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Collection file to read offline (overrides --profile)
    #[arg(long, global = true)]
    collection: Option<PathBuf>,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one metric for a deck
    Count {
        /// Deck name, with `::` between levels
        deck: String,

        /// Metric: new, total or seen
        kind: String,

        /// Data source: online, offline or auto
        #[arg(long, default_value = "auto")]
        mode: Mode,
    },

    /// Print all three metrics for a deck
    Summary {
        /// Deck name, with `::` between levels
        deck: String,

        /// Data source: online, offline or auto
        #[arg(long, default_value = "auto")]
        mode: Mode,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List deck names
    Decks {
        /// Data source: online, offline or auto
        #[arg(long, default_value = "auto")]
        mode: Mode,
    },
}

impl Args {
    fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    fn stats(&self) -> Stats {
        let mut builder = Stats::builder()
            .url(self.url())
            .timeout(Duration::from_secs(self.timeout));
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key.clone());
        }
        if let Some(profile) = &self.profile {
            builder = builder.profile(profile.clone());
        }
        if let Some(path) = &self.collection {
            builder = builder.collection_path(path.clone());
        }
        builder.build()
    }

    fn log_filter(&self) -> EnvFilter {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter())
        .with_writer(std::io::stderr)
        .init();

    let stats = args.stats();
    debug!(anki_url = %args.url(), command = ?args.command, "Running deckstat");

    match args.command {
        Command::Count { deck, kind, mode } => match stats.count(&deck, &kind, mode).await? {
            Some(n) => println!("{}", n),
            None => return Ok(ExitCode::from(NO_RESULT)),
        },
        Command::Summary { deck, mode, json } => {
            let summary = stats.summary(&deck, mode).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary);
            }
            if summary.new.is_none() && summary.total.is_none() {
                return Ok(ExitCode::from(NO_RESULT));
            }
        }
        Command::Decks { mode } => {
            for name in stats.deck_names(mode).await? {
                println!("{}", name);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
