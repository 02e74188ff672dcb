//! Read-only handle on a `collection.anki2` file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, ErrorCode, OpenFlags, OptionalExtension, params};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::sql::{
    ANKI_DIR, COLLECTION_FILE, COUNT_CARDS, COUNT_NEW_CARDS, DECK_ID_BY_NAME, DECK_NAMES,
    DISPLAY_SEPARATOR, HAS_DECKS_TABLE, LEGACY_DECKS, QUEUE_NEW, STORED_SEPARATOR,
    UNICASE_COLLATION,
};

/// How long to wait on a lock before reporting the store as unavailable.
///
/// A running Anki keeps its lock for the whole session.
const LOCK_WAIT: Duration = Duration::from_millis(250);

/// Internal numeric identifier of a deck (`cards.did`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeckId(pub i64);

/// Where the collection keeps its decks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Schema 11: decks are a JSON object in `col.decks`.
    Legacy,
    /// Schema 15+: decks live in the `decks` table.
    Modern,
}

/// A deck entry in the legacy JSON registry.
#[derive(Debug, Deserialize)]
struct LegacyDeck {
    id: i64,
    name: String,
}

/// An open, read-only Anki collection.
///
/// The connection is closed when the value is dropped.
///
/// # Example
///
/// ```no_run
/// use deckstat_collection::Collection;
///
/// # fn example() -> deckstat_collection::Result<()> {
/// let collection = Collection::open("collection.anki2")?;
/// let deck = collection.deck_id("Spanish")?;
/// println!("{} new of {}", collection.count_new_cards(deck)?, collection.count_cards(deck)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Collection {
    conn: Connection,
    path: PathBuf,
    layout: Layout,
}

impl Collection {
    /// Open a collection read-only.
    ///
    /// Fails with [`Error::StoreUnavailable`] when the file is missing,
    /// locked by a running Anki, or not a database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "Opening collection");

        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| Error::StoreUnavailable {
                path: path.clone(),
                source,
            })?;
        conn.busy_timeout(LOCK_WAIT)?;

        // The modern schema declares `decks.name COLLATE unicase`; without it
        // SQLite refuses statements that touch that column.
        conn.create_collation(UNICASE_COLLATION, |a: &str, b: &str| {
            a.to_lowercase().cmp(&b.to_lowercase())
        })?;

        let mut collection = Self {
            conn,
            path,
            layout: Layout::Legacy,
        };
        collection.layout = collection.detect_layout()?;
        Ok(collection)
    }

    /// Path of the collection for a profile under the platform data directory.
    ///
    /// `%APPDATA%\Anki2\<profile>\collection.anki2` on Windows,
    /// `~/Library/Application Support/Anki2/...` on macOS and
    /// `~/.local/share/Anki2/...` on Linux.
    pub fn default_path(profile: &str) -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or(Error::NoDataDir)?;
        Ok(data_dir.join(ANKI_DIR).join(profile).join(COLLECTION_FILE))
    }

    /// The file this collection was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Which deck layout the collection uses.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Resolve a deck name to its id.
    ///
    /// Matching is exact and case-sensitive. Subdecks are written with
    /// `::` as in the Anki UI.
    pub fn deck_id(&self, name: &str) -> Result<DeckId> {
        let id = match self.layout {
            Layout::Modern => {
                let stored = name.replace(DISPLAY_SEPARATOR, &STORED_SEPARATOR.to_string());
                self.conn
                    .query_row(DECK_ID_BY_NAME, params![stored], |row| row.get::<_, i64>(0))
                    .optional()
                    .map_err(|e| self.classify(e))?
            }
            Layout::Legacy => self
                .legacy_decks()?
                .into_values()
                .find(|deck| deck.name == name)
                .map(|deck| deck.id),
        };

        debug!(deck = name, id = ?id, layout = ?self.layout, "Resolved deck");
        id.map(DeckId)
            .ok_or_else(|| Error::DeckNotFound(name.to_string()))
    }

    /// Count every card in a deck.
    ///
    /// Only cards whose home is this exact deck are counted, not subdecks.
    pub fn count_cards(&self, deck: DeckId) -> Result<u64> {
        self.count(COUNT_CARDS, params![deck.0])
    }

    /// Count the cards in a deck that are still new.
    pub fn count_new_cards(&self, deck: DeckId) -> Result<u64> {
        self.count(COUNT_NEW_CARDS, params![deck.0, QUEUE_NEW])
    }

    /// All deck names, sorted, with `::` between levels.
    pub fn deck_names(&self) -> Result<Vec<String>> {
        let mut names = match self.layout {
            Layout::Modern => {
                let mut stmt = self.conn.prepare(DECK_NAMES).map_err(|e| self.classify(e))?;
                let rows = stmt
                    .query_map([], |row| row.get::<_, String>(0))
                    .map_err(|e| self.classify(e))?;
                rows.map(|name| {
                    name.map(|n| n.replace(STORED_SEPARATOR, DISPLAY_SEPARATOR))
                        .map_err(|e| self.classify(e))
                })
                .collect::<Result<Vec<_>>>()?
            }
            Layout::Legacy => self
                .legacy_decks()?
                .into_values()
                .map(|deck| deck.name)
                .collect(),
        };
        names.sort();
        Ok(names)
    }

    fn count(&self, sql: &str, params: impl rusqlite::Params) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row(sql, params, |row| row.get(0))
            .map_err(|e| self.classify(e))?;
        Ok(u64::try_from(n).unwrap_or_default())
    }

    fn detect_layout(&self) -> Result<Layout> {
        let tables: i64 = self
            .conn
            .query_row(HAS_DECKS_TABLE, [], |row| row.get(0))
            .map_err(|e| self.classify(e))?;
        Ok(if tables > 0 {
            Layout::Modern
        } else {
            Layout::Legacy
        })
    }

    fn legacy_decks(&self) -> Result<HashMap<String, LegacyDeck>> {
        let json: String = self
            .conn
            .query_row(LEGACY_DECKS, [], |row| row.get(0))
            .map_err(|e| self.classify(e))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Sort an SQLite failure into "store unavailable" or a plain query error.
    fn classify(&self, err: rusqlite::Error) -> Error {
        match err.sqlite_error_code() {
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::PermissionDenied
                | ErrorCode::SystemIoFailure
                | ErrorCode::FileLockingProtocolFailed,
            ) => Error::StoreUnavailable {
                path: self.path.clone(),
                source: err,
            },
            _ => Error::Sqlite(err),
        }
    }
}
