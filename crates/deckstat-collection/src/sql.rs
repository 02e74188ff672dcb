//! Queries and constants for the Anki collection schema.
//!
//! Two layouts are in the wild. Schema 11 (still used inside `.apkg`
//! files) stores decks as one JSON object in `col.decks`. Schema 15 and
//! later (Anki 2.1.28+) has a real `decks` table.

/// Whether the modern `decks` table exists.
pub const HAS_DECKS_TABLE: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'decks'";

/// Exact, byte-wise deck lookup in the modern layout.
pub const DECK_ID_BY_NAME: &str = "SELECT id FROM decks WHERE name = ?1 COLLATE BINARY";

/// All deck names in the modern layout.
pub const DECK_NAMES: &str = "SELECT name FROM decks";

/// The JSON deck registry in the legacy layout.
pub const LEGACY_DECKS: &str = "SELECT decks FROM col";

/// Every card in a deck.
pub const COUNT_CARDS: &str = "SELECT COUNT(*) FROM cards WHERE did = ?1";

/// Cards in a deck whose queue marks them as new.
pub const COUNT_NEW_CARDS: &str = "SELECT COUNT(*) FROM cards WHERE did = ?1 AND queue = ?2";

/// `cards.queue` value for new cards.
pub const QUEUE_NEW: i64 = 0;

/// Separator between deck levels as users write it.
pub const DISPLAY_SEPARATOR: &str = "::";

/// Separator between deck levels as the modern `decks` table stores it.
pub const STORED_SEPARATOR: char = '\x1f';

/// Collation the modern schema declares on `decks.name`.
pub const UNICASE_COLLATION: &str = "unicase";

/// Collection file name inside a profile folder.
pub const COLLECTION_FILE: &str = "collection.anki2";

/// Folder under the platform data directory that holds Anki profiles.
pub const ANKI_DIR: &str = "Anki2";

/// Profile Anki creates on first launch.
pub const DEFAULT_PROFILE: &str = "User 1";
