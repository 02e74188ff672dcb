//! Deck-related AnkiConnect actions.

use crate::client::ConnectClient;
use crate::error::Result;

/// Provides access to deck-related AnkiConnect operations.
///
/// Obtained via [`ConnectClient::decks()`].
#[derive(Debug)]
pub struct DeckActions<'a> {
    pub(crate) client: &'a ConnectClient,
}

impl<'a> DeckActions<'a> {
    /// Get all deck names.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use deckstat_connect::ConnectClient;
    /// # async fn example() -> deckstat_connect::Result<()> {
    /// let client = ConnectClient::new();
    /// for name in client.decks().names().await? {
    ///     println!("{}", name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn names(&self) -> Result<Vec<String>> {
        self.client.invoke_without_params("deckNames").await
    }
}
