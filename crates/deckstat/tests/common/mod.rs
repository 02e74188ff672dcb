//! Common test utilities for deckstat tests.
//!
//! Online tests run against a wiremock AnkiConnect; offline tests against
//! a collection file built in a temporary directory.

use std::path::{Path, PathBuf};

use deckstat::Stats;
use rusqlite::{Connection, params};
use serde::Serialize;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

/// Start a new mock server for testing.
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a dispatcher whose online side talks to the mock server.
#[allow(dead_code)]
pub fn stats_for_mock(server: &MockServer) -> Stats {
    Stats::builder().url(server.uri()).build()
}

/// Create a successful AnkiConnect response.
#[allow(dead_code)]
pub fn mock_anki_response<T: Serialize>(result: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": result,
        "error": null
    }))
}

/// Create an error AnkiConnect response.
#[allow(dead_code)]
pub fn mock_anki_error(error: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": null,
        "error": error
    }))
}

/// A `findCards` result holding `n` card ids.
#[allow(dead_code)]
pub fn card_ids(n: i64) -> ResponseTemplate {
    mock_anki_response((1..=n).collect::<Vec<i64>>())
}

/// Mount a mock for a specific action (expect exactly 1 call).
#[allow(dead_code)]
pub async fn mock_action(server: &MockServer, action: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": action,
            "version": 6
        })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a `findCards` mock for one query (expect exactly 1 call).
#[allow(dead_code)]
pub async fn mock_find_cards(server: &MockServer, query: &str, response: ResponseTemplate) {
    mock_find_cards_times(server, query, response, 1).await;
}

/// Mount a `findCards` mock for one query with expected call count.
#[allow(dead_code)]
pub async fn mock_find_cards_times(
    server: &MockServer,
    query: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "findCards",
            "version": 6,
            "params": {"query": query}
        })))
        .respond_with(response)
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// A loopback URL with nothing listening on it.
#[allow(dead_code)]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Tables shared by both collection layouts.
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
"#;

const DECKS_TABLE: &str = r#"
CREATE TABLE decks (
    id              INTEGER PRIMARY KEY NOT NULL,
    name            TEXT NOT NULL COLLATE unicase,
    mtime_secs      INTEGER NOT NULL,
    usn             INTEGER NOT NULL,
    common          BLOB NOT NULL,
    kind            BLOB NOT NULL
);
"#;

/// Queue values used by Anki.
#[allow(dead_code)]
pub mod queue {
    pub const SUSPENDED: i64 = -1;
    pub const NEW: i64 = 0;
    pub const LEARNING: i64 = 1;
    pub const REVIEW: i64 = 2;
}

/// A modern-layout collection file in a temporary directory.
pub struct Collection {
    conn: Connection,
    path: PathBuf,
    _dir: TempDir,
}

#[allow(dead_code, clippy::new_without_default)]
impl Collection {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.anki2");
        let conn = Connection::open(&path).unwrap();
        conn.create_collation("unicase", |a: &str, b: &str| {
            a.to_lowercase().cmp(&b.to_lowercase())
        })
        .unwrap();
        conn.execute_batch(BASE_SCHEMA).unwrap();
        conn.execute_batch(DECKS_TABLE).unwrap();
        conn.execute(
            "INSERT INTO col VALUES (1, 0, 0, 0, 18, 0, 0, 0, '{}', '{}', '{}', '{}', '{}')",
            [],
        )
        .unwrap();

        Self {
            conn,
            path,
            _dir: dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A dispatcher that reads this file offline and finds nothing online.
    pub fn stats(&self) -> Stats {
        Stats::builder()
            .url(unreachable_url())
            .collection_path(&self.path)
            .build()
    }

    pub fn deck(self, id: i64, name: &str) -> Self {
        self.conn
            .execute(
                "INSERT INTO decks VALUES (?1, ?2, 0, 0, x'', x'')",
                params![id, name.replace("::", "\x1f")],
            )
            .unwrap();
        self
    }

    pub fn cards(self, did: i64, queue: i64, n: usize) -> Self {
        for _ in 0..n {
            self.conn
                .execute(
                    "INSERT INTO cards VALUES
                     (NULL, 1, ?1, 0, 0, 0, ?2, ?3, 0, 0, 0, 0, 0, 0, 0, 0, 0, '')",
                    params![did, queue.max(0), queue],
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

/// The "Spanish" deck: 100 cards, 20 of them new. "Default" holds 7 more.
#[allow(dead_code)]
pub fn spanish() -> Collection {
    Collection::new()
        .deck(1, "Default")
        .deck(1001, "Spanish")
        .cards(1001, queue::NEW, 20)
        .cards(1001, queue::LEARNING, 10)
        .cards(1001, queue::REVIEW, 65)
        .cards(1001, queue::SUSPENDED, 5)
        .cards(1, queue::NEW, 7)
}
