//! Error types for deckstat-collection.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for collection reads.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a collection.
#[derive(Debug, Error)]
pub enum Error {
    /// No deck has exactly this name.
    #[error("deck not found: {0}")]
    DeckNotFound(String),

    /// The collection could not be opened or read.
    ///
    /// Covers a missing file, a lock held by the running Anki process,
    /// and files that are not (or no longer) valid SQLite databases.
    #[error("collection unavailable at {}: {source}", path.display())]
    StoreUnavailable {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// The platform data directory could not be determined.
    #[error("could not determine the Anki data directory")]
    NoDataDir,

    /// Any other SQLite error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The legacy deck registry in `col.decks` is not valid JSON.
    #[error("invalid deck registry: {0}")]
    Json(#[from] serde_json::Error),
}
