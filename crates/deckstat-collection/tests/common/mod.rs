//! Builders for throwaway collection files.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tempfile::TempDir;

/// Tables shared by both layouts.
const BASE_SCHEMA: &str = r#"
CREATE TABLE col (
    id              INTEGER PRIMARY KEY,
    crt             INTEGER NOT NULL,
    mod             INTEGER NOT NULL,
    scm             INTEGER NOT NULL,
    ver             INTEGER NOT NULL,
    dty             INTEGER NOT NULL,
    usn             INTEGER NOT NULL,
    ls              INTEGER NOT NULL,
    conf            TEXT NOT NULL,
    models          TEXT NOT NULL,
    decks           TEXT NOT NULL,
    dconf           TEXT NOT NULL,
    tags            TEXT NOT NULL
);

CREATE TABLE cards (
    id              INTEGER PRIMARY KEY,
    nid             INTEGER NOT NULL,
    did             INTEGER NOT NULL,
    ord             INTEGER NOT NULL,
    mod             INTEGER NOT NULL,
    usn             INTEGER NOT NULL,
    type            INTEGER NOT NULL,
    queue           INTEGER NOT NULL,
    due             INTEGER NOT NULL,
    ivl             INTEGER NOT NULL,
    factor          INTEGER NOT NULL,
    reps            INTEGER NOT NULL,
    lapses          INTEGER NOT NULL,
    left            INTEGER NOT NULL,
    odue            INTEGER NOT NULL,
    odid            INTEGER NOT NULL,
    flags           INTEGER NOT NULL,
    data            TEXT NOT NULL
);

CREATE INDEX ix_cards_sched ON cards (did, queue, due);
"#;

/// The `decks` table introduced with schema 15.
const DECKS_TABLE: &str = r#"
CREATE TABLE decks (
    id              INTEGER PRIMARY KEY NOT NULL,
    name            TEXT NOT NULL COLLATE unicase,
    mtime_secs      INTEGER NOT NULL,
    usn             INTEGER NOT NULL,
    common          BLOB NOT NULL,
    kind            BLOB NOT NULL
);

CREATE UNIQUE INDEX idx_decks_name ON decks (name);
"#;

/// Which deck layout to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Schema {
    Legacy,
    Modern,
}

/// A collection file in a temporary directory.
pub struct Fixture {
    conn: Connection,
    path: PathBuf,
    schema: Schema,
    legacy_decks: serde_json::Map<String, serde_json::Value>,
    _dir: TempDir,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new(schema: Schema) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.anki2");
        let conn = Connection::open(&path).unwrap();
        conn.create_collation("unicase", |a: &str, b: &str| {
            a.to_lowercase().cmp(&b.to_lowercase())
        })
        .unwrap();

        conn.execute_batch(BASE_SCHEMA).unwrap();
        let ver = match schema {
            Schema::Legacy => 11,
            Schema::Modern => {
                conn.execute_batch(DECKS_TABLE).unwrap();
                18
            }
        };
        conn.execute(
            "INSERT INTO col VALUES (1, 0, 0, 0, ?1, 0, 0, 0, '{}', '{}', '{}', '{}', '{}')",
            params![ver],
        )
        .unwrap();

        Self {
            conn,
            path,
            schema,
            legacy_decks: serde_json::Map::new(),
            _dir: dir,
        }
    }

    pub fn modern() -> Self {
        Self::new(Schema::Modern)
    }

    pub fn legacy() -> Self {
        Self::new(Schema::Legacy)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a deck. Names use `::` between levels, as users type them.
    pub fn deck(mut self, id: i64, name: &str) -> Self {
        match self.schema {
            Schema::Modern => {
                self.conn
                    .execute(
                        "INSERT INTO decks VALUES (?1, ?2, 0, 0, x'', x'')",
                        params![id, name.replace("::", "\x1f")],
                    )
                    .unwrap();
            }
            Schema::Legacy => {
                self.legacy_decks.insert(
                    id.to_string(),
                    serde_json::json!({"id": id, "name": name, "dyn": 0, "usn": 0}),
                );
                let json = serde_json::Value::Object(self.legacy_decks.clone()).to_string();
                self.conn
                    .execute("UPDATE col SET decks = ?1", params![json])
                    .unwrap();
            }
        }
        self
    }

    /// Add `n` cards with the given queue value to a deck.
    pub fn cards(self, did: i64, queue: i64, n: usize) -> Self {
        let card_type = queue.max(0);
        for _ in 0..n {
            self.conn
                .execute(
                    "INSERT INTO cards VALUES
                     (NULL, 1, ?1, 0, 0, 0, ?2, ?3, 0, 0, 0, 0, 0, 0, 0, 0, 0, '')",
                    params![did, card_type, queue],
                )
                .unwrap();
        }
        self
    }

    /// Hold an exclusive lock the way a running Anki does.
    pub fn lock(&self) {
        self.conn
            .execute_batch("PRAGMA locking_mode = EXCLUSIVE; BEGIN EXCLUSIVE;")
            .unwrap();
    }
}

/// Queue values used by Anki.
#[allow(dead_code)]
pub mod queue {
    pub const SUSPENDED: i64 = -1;
    pub const NEW: i64 = 0;
    pub const LEARNING: i64 = 1;
    pub const REVIEW: i64 = 2;
}

/// The "Spanish" deck: 100 cards, 20 of them new.
#[allow(dead_code)]
pub fn spanish(schema: Schema) -> Fixture {
    Fixture::new(schema)
        .deck(1, "Default")
        .deck(1001, "Spanish")
        .cards(1001, queue::NEW, 20)
        .cards(1001, queue::LEARNING, 10)
        .cards(1001, queue::REVIEW, 65)
        .cards(1001, queue::SUSPENDED, 5)
        .cards(1, queue::NEW, 7)
}
