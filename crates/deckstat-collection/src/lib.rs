//! Read-only deck and card counts straight from an Anki collection file.
//!
//! Anki keeps each profile's data in a SQLite file, `collection.anki2`.
//! When Anki is closed the file can be read directly; while it is running
//! Anki holds a lock and reads fail with [`Error::StoreUnavailable`] (use
//! AnkiConnect then).
//!
//! Nothing in this crate writes to the collection. Every connection is
//! opened with `SQLITE_OPEN_READ_ONLY`.
//!
//! # Example
//!
//! ```no_run
//! use deckstat_collection::{Collection, DEFAULT_PROFILE};
//!
//! # fn example() -> deckstat_collection::Result<()> {
//! let path = Collection::default_path(DEFAULT_PROFILE)?;
//! let collection = Collection::open(path)?;
//!
//! let deck = collection.deck_id("Spanish")?;
//! let total = collection.count_cards(deck)?;
//! let new = collection.count_new_cards(deck)?;
//! println!("Spanish: {} seen of {}", total - new, total);
//! # Ok(())
//! # }
//! ```
//!
//! # Deck names
//!
//! Lookups are exact: `spanish` does not find `Spanish`. Subdecks are
//! written `Parent::Child` regardless of how the collection stores them.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod collection;
pub mod error;
mod sql;

pub use collection::{Collection, DeckId, Layout};
pub use error::{Error, Result};
pub use sql::{DEFAULT_PROFILE, QUEUE_NEW};
