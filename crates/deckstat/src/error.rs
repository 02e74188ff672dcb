//! Error types for deckstat.
//!
//! Errors fall into two groups:
//!
//! 1. **Validation errors** ([`Error::InvalidMetricKind`], [`Error::InvalidMode`]):
//!    the caller asked for something that does not exist. These are always
//!    returned.
//! 2. **Reasons a count is missing**: everything else. The dispatcher logs
//!    them and reports no result instead (see [`narrow`](crate::narrow)).
//!
//! # Example
//!
//! ```no_run
//! use deckstat::{Error, Mode, Stats};
//!
//! # async fn example() {
//! let stats = Stats::new();
//!
//! match stats.count("Spanish", "seen", Mode::Offline).await {
//!     Ok(Some(n)) => println!("{} cards seen", n),
//!     Ok(None) => println!("no result, see the log"),
//!     Err(Error::InvalidMetricKind(kind)) => eprintln!("unknown metric {}", kind),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// Result type for deckstat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors and failure reasons for deck statistics.
#[derive(Debug, Error)]
pub enum Error {
    /// The metric kind is not one of `new`, `total`, `seen`.
    #[error("invalid metric kind {0:?}: expected new, total or seen")]
    InvalidMetricKind(String),

    /// The mode is not one of `online`, `offline`, `auto`.
    #[error("invalid mode {0:?}: expected online, offline or auto")]
    InvalidMode(String),

    /// An empty deck name was given.
    #[error("deck name is empty")]
    EmptyDeckName,

    /// Nothing is listening at the AnkiConnect URL; Anki is probably closed.
    #[error("AnkiConnect is not reachable at {url}")]
    Unreachable {
        /// The URL that was tried.
        url: String,
    },

    /// AnkiConnect answered with an error.
    #[error("online read failed: {0}")]
    Connect(deckstat_connect::Error),

    /// The collection file could not be read.
    #[error("offline read failed: {0}")]
    Collection(#[from] deckstat_collection::Error),

    /// `new` came back larger than `total`, so `seen` would be negative.
    ///
    /// The two reads saw different states of the deck.
    #[error("inconsistent counts: {new} new out of {total} total")]
    InconsistentDerivedMetric {
        /// Total card count.
        total: u64,
        /// New card count.
        new: u64,
    },
}

impl Error {
    /// Whether this is a caller mistake rather than a missing count.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidMetricKind(_) | Error::InvalidMode(_))
    }
}
