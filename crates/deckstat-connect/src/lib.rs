//! A small async client for the read-only AnkiConnect actions deckstat uses.
//!
//! AnkiConnect is an Anki add-on that exposes the running application over
//! HTTP on `127.0.0.1:8765`. This crate speaks protocol version 6 and covers
//! exactly what deck statistics need: finding cards by query and listing
//! deck names.
//!
//! # Quick Start
//!
//! ```no_run
//! use deckstat_connect::{ConnectClient, QueryBuilder};
//!
//! # async fn example() -> deckstat_connect::Result<()> {
//! let client = ConnectClient::new();
//!
//! let total = client
//!     .cards()
//!     .count(&QueryBuilder::new().deck_exact("Spanish").build())
//!     .await?;
//! println!("Spanish has {} cards", total);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! - Anki must be running
//! - The AnkiConnect add-on must be installed

#![warn(missing_docs)]

mod actions;
mod client;
mod error;
mod query;
mod request;

pub use actions::{CardActions, DeckActions};
pub use client::{ClientBuilder, ConnectClient, DEFAULT_TIMEOUT, DEFAULT_URL};
pub use error::{Error, Result};
pub use query::QueryBuilder;
