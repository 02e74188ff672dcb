//! Card-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use deckstat_connect::{ConnectClient, QueryBuilder};
//!
//! # async fn example() -> deckstat_connect::Result<()> {
//! let client = ConnectClient::new();
//!
//! let query = QueryBuilder::new().deck_exact("Spanish").is_new().build();
//! let new_cards = client.cards().count(&query).await?;
//! println!("New cards: {}", new_cards);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::client::ConnectClient;
use crate::error::Result;

/// Provides access to card-related AnkiConnect operations.
///
/// Obtained via [`ConnectClient::cards()`].
#[derive(Debug)]
pub struct CardActions<'a> {
    pub(crate) client: &'a ConnectClient,
}

#[derive(Serialize)]
struct FindCardsParams<'a> {
    query: &'a str,
}

impl<'a> CardActions<'a> {
    /// Find cards matching a query.
    ///
    /// Returns the matching card IDs. The query uses Anki's search syntax,
    /// e.g. `deck:"Spanish" is:new`.
    pub async fn find(&self, query: &str) -> Result<Vec<i64>> {
        self.client
            .invoke("findCards", FindCardsParams { query })
            .await
    }

    /// Count cards matching a query.
    ///
    /// AnkiConnect has no count action, so this fetches the IDs and
    /// counts them.
    pub async fn count(&self, query: &str) -> Result<u64> {
        let ids = self.find(query).await?;
        Ok(ids.len() as u64)
    }
}
