//! Error types for the deckstat-connect crate.
//!
//! The most common errors you'll encounter are:
//!
//! - [`Error::ConnectionRefused`]: Anki is not running or AnkiConnect is not installed
//! - [`Error::AnkiConnect`]: The query failed (e.g., malformed search)
//! - [`Error::PermissionDenied`]: API key required or request needs approval
//!
//! # Example
//!
//! ```no_run
//! use deckstat_connect::{ConnectClient, Error};
//!
//! # async fn example() {
//! let client = ConnectClient::new();
//!
//! match client.cards().find("deck:\"Spanish\"").await {
//!     Ok(cards) => println!("Found {} cards", cards.len()),
//!     Err(Error::ConnectionRefused) => {
//!         eprintln!("Please start Anki with AnkiConnect installed");
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// The error type for AnkiConnect operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest.
    ///
    /// Typically indicates network issues unrelated to Anki.
    /// For connection issues, see [`Error::ConnectionRefused`].
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// AnkiConnect returned an error message.
    ///
    /// The message is passed through unchanged from the remote side.
    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    /// Response was empty (no result or error).
    #[error("AnkiConnect returned empty response")]
    EmptyResponse,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connection refused - Anki is likely not running.
    ///
    /// This error occurs when:
    /// - Anki is not running
    /// - The AnkiConnect add-on is not installed
    /// - AnkiConnect is configured on a different port
    #[error("Could not connect to Anki. Is Anki running with AnkiConnect installed?")]
    ConnectionRefused,

    /// Permission denied by AnkiConnect.
    ///
    /// An API key is required and was missing or wrong, or the request
    /// needs approval in the Anki UI.
    #[error("Permission denied. Request permission first or check API key.")]
    PermissionDenied,
}

impl Error {
    /// Whether the endpoint could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::ConnectionRefused)
    }
}

/// A specialized Result type for AnkiConnect operations.
pub type Result<T> = std::result::Result<T, Error>;
