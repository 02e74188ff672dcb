//! The two interchangeable ways of counting cards in a deck.
//!
//! [`OnlineCounter`] asks a running Anki through AnkiConnect;
//! [`OfflineCounter`] reads the collection file directly. Both implement
//! [`DeckCounter`], and the dispatcher picks one per call from the
//! [`Mode`](crate::Mode).

use std::future::Future;
use std::path::PathBuf;

use deckstat_collection::{Collection, DEFAULT_PROFILE};
use deckstat_connect::{ConnectClient, QueryBuilder};
use tracing::debug;

use crate::error::{Error, Result};
use crate::metric::{CardScope, Count};

/// A source of per-deck card counts.
pub trait DeckCounter {
    /// Count the cards of `deck` in `scope`.
    ///
    /// Failures are returned as reasons; the dispatcher decides what the
    /// caller sees.
    fn count_cards(&self, deck: &str, scope: CardScope) -> impl Future<Output = Result<Count>> + Send;

    /// List every deck name this source knows.
    fn deck_names(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Counts cards through AnkiConnect.
#[derive(Debug, Clone, Default)]
pub struct OnlineCounter {
    client: ConnectClient,
}

impl OnlineCounter {
    /// Wrap a configured client.
    pub fn new(client: ConnectClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &ConnectClient {
        &self.client
    }

    /// Build the search for `deck` in `scope`.
    pub fn query(deck: &str, scope: CardScope) -> String {
        let query = QueryBuilder::new().deck_exact(deck);
        match scope {
            CardScope::All => query.build(),
            CardScope::New => query.is_new().build(),
        }
    }

    fn reason(&self, err: deckstat_connect::Error) -> Error {
        if err.is_unreachable() {
            Error::Unreachable {
                url: self.client.url().to_string(),
            }
        } else {
            Error::Connect(err)
        }
    }
}

impl DeckCounter for OnlineCounter {
    async fn count_cards(&self, deck: &str, scope: CardScope) -> Result<Count> {
        let query = Self::query(deck, scope);
        debug!(deck, query = %query, "Counting cards via AnkiConnect");
        self.client
            .cards()
            .count(&query)
            .await
            .map_err(|e| self.reason(e))
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        self.client
            .decks()
            .names()
            .await
            .map_err(|e| self.reason(e))
    }
}

/// Counts cards by reading the collection file.
///
/// Each call opens its own read-only connection and closes it before
/// returning.
#[derive(Debug, Clone)]
pub struct OfflineCounter {
    path: Option<PathBuf>,
    profile: String,
}

impl OfflineCounter {
    /// Read the collection at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            profile: DEFAULT_PROFILE.to_string(),
        }
    }

    /// Read the collection of a profile in the platform data directory.
    pub fn for_profile(profile: impl Into<String>) -> Self {
        Self {
            path: None,
            profile: profile.into(),
        }
    }

    /// The collection file this counter reads.
    pub fn path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Collection::default_path(&self.profile)?),
        }
    }

    fn open(&self) -> Result<Collection> {
        Ok(Collection::open(self.path()?)?)
    }
}

impl Default for OfflineCounter {
    fn default() -> Self {
        Self::for_profile(DEFAULT_PROFILE)
    }
}

impl DeckCounter for OfflineCounter {
    async fn count_cards(&self, deck: &str, scope: CardScope) -> Result<Count> {
        let collection = self.open()?;
        let id = collection.deck_id(deck)?;
        debug!(deck, id = id.0, ?scope, "Counting cards in collection");
        let count = match scope {
            CardScope::All => collection.count_cards(id)?,
            CardScope::New => collection.count_new_cards(id)?,
        };
        Ok(count)
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        Ok(self.open()?.deck_names()?)
    }
}
