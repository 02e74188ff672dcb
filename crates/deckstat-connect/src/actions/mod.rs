//! Action modules for AnkiConnect operations.

mod cards;
mod decks;

pub use cards::CardActions;
pub use decks::DeckActions;
