//! New, total and seen card counts for Anki decks.
//!
//! Counts come from one of two places:
//!
//! - **online**: a running Anki, through the AnkiConnect add-on
//!   ([`deckstat_connect`]);
//! - **offline**: the profile's `collection.anki2` file while Anki is closed
//!   ([`deckstat_collection`]).
//!
//! `seen` is derived as `total - new` from two reads of the same source.
//!
//! # Quick Start
//!
//! ```no_run
//! # async fn example() -> deckstat::Result<()> {
//! // The plain switch: `true` for online, `false` for offline.
//! match deckstat::count("Spanish", "seen", false).await? {
//!     Some(n) => println!("Spanish: {} cards seen", n),
//!     None => println!("Spanish: no result (see log)"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Fail-soft reporting
//!
//! Statistics are a reporting aid, so a missing number is preferred over a
//! failed caller. Every reason a count cannot be produced (unknown deck,
//! locked collection, Anki not running, AnkiConnect errors, inconsistent
//! reads) is logged with `tracing` and reported as `None`. The only error
//! [`Stats::count`] returns is [`Error::InvalidMetricKind`].
//!
//! Callers who want the reason instead can use [`Stats::measure`].
//!
//! # Configuration
//!
//! ```no_run
//! use std::time::Duration;
//! use deckstat::{Mode, MetricKind, Stats};
//!
//! # async fn example() {
//! let stats = Stats::builder()
//!     .url("http://127.0.0.1:8765")
//!     .timeout(Duration::from_secs(5))
//!     .profile("Work")
//!     .build();
//!
//! let new = stats.count_metric("Spanish", MetricKind::New, Mode::Auto).await;
//! # }
//! ```

#![warn(missing_docs)]

mod counter;
mod error;
mod metric;
mod summary;

use std::path::PathBuf;
use std::time::Duration;

use deckstat_connect::ClientBuilder;
use tracing::{info, warn};

pub use counter::{DeckCounter, OfflineCounter, OnlineCounter};
pub use error::{Error, Result};
pub use metric::{CardScope, Count, MetricKind, Mode};
pub use summary::DeckSummary;

// Re-export the accessor crates for callers that need them directly.
pub use deckstat_collection as collection;
pub use deckstat_connect as connect;

/// Count a metric for a deck with default settings.
///
/// `online` picks AnkiConnect (`true`) or the collection file of profile
/// `User 1` (`false`). Returns `Ok(None)` when the count could not be
/// produced and `Err` only for an unknown metric kind.
pub async fn count(deck: &str, kind: &str, online: bool) -> Result<Option<Count>> {
    Stats::new().count(deck, kind, Mode::from(online)).await
}

/// Fold an accessor outcome into the fail-soft public result.
///
/// Validation errors pass through; every other reason becomes `None`.
pub fn narrow(outcome: Result<Count>) -> Result<Option<Count>> {
    match outcome {
        Ok(n) => Ok(Some(n)),
        Err(e) if e.is_validation() => Err(e),
        Err(_) => Ok(None),
    }
}

/// Derive `seen` from `total` and `new`.
///
/// Fails with [`Error::InconsistentDerivedMetric`] rather than returning
/// a negative or wrapped value.
pub fn seen(total: Count, new: Count) -> Result<Count> {
    total
        .checked_sub(new)
        .ok_or(Error::InconsistentDerivedMetric { total, new })
}

/// Deck statistics dispatcher.
///
/// Holds one counter per source and routes each request to the one the
/// [`Mode`] selects.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    online: OnlineCounter,
    offline: OfflineCounter,
}

impl Stats {
    /// Create a dispatcher with default settings.
    ///
    /// AnkiConnect at `http://127.0.0.1:8765`, collection of profile `User 1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> StatsBuilder {
        StatsBuilder::new()
    }

    /// Create a dispatcher from ready-made counters.
    pub fn from_counters(online: OnlineCounter, offline: OfflineCounter) -> Self {
        Self { online, offline }
    }

    /// The AnkiConnect counter.
    pub fn online(&self) -> &OnlineCounter {
        &self.online
    }

    /// The collection file counter.
    pub fn offline(&self) -> &OfflineCounter {
        &self.offline
    }

    /// Count a metric, with the metric kind given by name.
    ///
    /// Returns `Err(Error::InvalidMetricKind)` for anything but `new`,
    /// `total` or `seen`. Every other failure is logged and reported as
    /// `Ok(None)`.
    pub async fn count(&self, deck: &str, kind: &str, mode: Mode) -> Result<Option<Count>> {
        let kind: MetricKind = kind.parse()?;
        Ok(self.count_metric(deck, kind, mode).await)
    }

    /// Count a metric, reporting `None` when it cannot be produced.
    pub async fn count_metric(&self, deck: &str, kind: MetricKind, mode: Mode) -> Option<Count> {
        let outcome = self.measure(deck, kind, mode).await;
        settle(deck, kind, mode, outcome)
    }

    /// Count a metric and return the reason when it cannot be produced.
    pub async fn measure(&self, deck: &str, kind: MetricKind, mode: Mode) -> Result<Count> {
        match mode {
            Mode::Online => measure_with(&self.online, deck, kind).await,
            Mode::Offline => measure_with(&self.offline, deck, kind).await,
            Mode::Auto => match measure_with(&self.online, deck, kind).await {
                Err(Error::Unreachable { url }) => {
                    info!(deck, %url, "AnkiConnect not reachable, reading the collection");
                    measure_with(&self.offline, deck, kind).await
                }
                outcome => outcome,
            },
        }
    }

    /// New, total and seen for one deck from one pair of reads.
    pub async fn summary(&self, deck: &str, mode: Mode) -> DeckSummary {
        let (source, total, new) = match mode {
            Mode::Online => {
                let (total, new) = read_pair(&self.online, deck).await;
                (Mode::Online, total, new)
            }
            Mode::Offline => {
                let (total, new) = read_pair(&self.offline, deck).await;
                (Mode::Offline, total, new)
            }
            Mode::Auto => {
                let total = count_scope(&self.online, deck, CardScope::All).await;
                if let Err(Error::Unreachable { url }) = &total {
                    info!(deck, %url, "AnkiConnect not reachable, reading the collection");
                    let (total, new) = read_pair(&self.offline, deck).await;
                    (Mode::Offline, total, new)
                } else {
                    let new = count_scope(&self.online, deck, CardScope::New).await;
                    (Mode::Online, total, new)
                }
            }
        };

        // A failed read is logged once, under its own metric.
        let derived = match (&total, &new) {
            (Ok(total), Ok(new)) => settle(deck, MetricKind::Seen, source, seen(*total, *new)),
            _ => None,
        };

        DeckSummary {
            deck: deck.to_string(),
            mode: source,
            new: settle(deck, MetricKind::New, source, new),
            total: settle(deck, MetricKind::Total, source, total),
            seen: derived,
        }
    }

    /// List deck names from the selected source.
    ///
    /// Unlike [`count`](Self::count), failures are returned.
    pub async fn deck_names(&self, mode: Mode) -> Result<Vec<String>> {
        match mode {
            Mode::Online => self.online.deck_names().await,
            Mode::Offline => self.offline.deck_names().await,
            Mode::Auto => match self.online.deck_names().await {
                Err(Error::Unreachable { url }) => {
                    info!(%url, "AnkiConnect not reachable, reading the collection");
                    self.offline.deck_names().await
                }
                outcome => outcome,
            },
        }
    }
}

/// Builder for a customized [`Stats`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use deckstat::Stats;
///
/// let stats = Stats::builder()
///     .url("http://localhost:8765")
///     .api_key("my-secret-key")
///     .timeout(Duration::from_secs(10))
///     .collection_path("/backups/collection.anki2")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatsBuilder {
    client: ClientBuilder,
    profile: Option<String>,
    collection_path: Option<PathBuf>,
}

impl StatsBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AnkiConnect URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.url(url);
        self
    }

    /// Set the AnkiConnect API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.client = self.client.api_key(key);
        self
    }

    /// Set the AnkiConnect request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.client = self.client.timeout(duration);
        self
    }

    /// Read the collection of this profile. Defaults to `User 1`.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Read this collection file. Takes precedence over [`profile`](Self::profile).
    pub fn collection_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.collection_path = Some(path.into());
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Stats {
        let offline = match (self.collection_path, self.profile) {
            (Some(path), _) => OfflineCounter::new(path),
            (None, Some(profile)) => OfflineCounter::for_profile(profile),
            (None, None) => OfflineCounter::default(),
        };
        Stats::from_counters(OnlineCounter::new(self.client.build()), offline)
    }
}

/// Count one scope, refusing empty deck names before any I/O.
async fn count_scope<C: DeckCounter>(counter: &C, deck: &str, scope: CardScope) -> Result<Count> {
    if deck.is_empty() {
        return Err(Error::EmptyDeckName);
    }
    counter.count_cards(deck, scope).await
}

async fn measure_with<C: DeckCounter>(counter: &C, deck: &str, kind: MetricKind) -> Result<Count> {
    match kind {
        MetricKind::New => count_scope(counter, deck, CardScope::New).await,
        MetricKind::Total => count_scope(counter, deck, CardScope::All).await,
        MetricKind::Seen => {
            let total = count_scope(counter, deck, CardScope::All).await?;
            let new = count_scope(counter, deck, CardScope::New).await?;
            seen(total, new)
        }
    }
}

async fn read_pair<C: DeckCounter>(counter: &C, deck: &str) -> (Result<Count>, Result<Count>) {
    let total = count_scope(counter, deck, CardScope::All).await;
    let new = count_scope(counter, deck, CardScope::New).await;
    (total, new)
}

/// Log a missing count with its context and drop the reason.
///
/// `outcome` comes from an accessor, so it never holds a validation error.
fn settle(deck: &str, kind: MetricKind, mode: Mode, outcome: Result<Count>) -> Option<Count> {
    if let Err(e) = &outcome {
        warn!(deck, metric = %kind, %mode, error = %e, "No result for deck metric");
    }
    narrow(outcome).ok().flatten()
}
