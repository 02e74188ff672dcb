//! All three metrics for one deck.

use std::fmt;

use serde::Serialize;

use crate::metric::{Count, Mode};

/// New, total and seen counts for a deck, from a single pair of reads.
///
/// A field is `None` when its count could not be produced; the reason
/// has already been logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckSummary {
    /// Deck name as requested.
    pub deck: String,
    /// Source that answered. [`Mode::Auto`] never appears here.
    pub mode: Mode,
    /// New cards.
    pub new: Option<Count>,
    /// All cards.
    pub total: Option<Count>,
    /// Cards studied at least once.
    pub seen: Option<Count>,
}

impl fmt::Display for DeckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show(value: Option<Count>) -> String {
            value.map_or_else(|| "-".to_string(), |n| n.to_string())
        }

        writeln!(f, "deck:  {}", self.deck)?;
        writeln!(f, "mode:  {}", self.mode)?;
        writeln!(f, "new:   {}", show(self.new))?;
        writeln!(f, "total: {}", show(self.total))?;
        write!(f, "seen:  {}", show(self.seen))
    }
}
