//! Builder for the small subset of Anki search syntax deckstat issues.
//!
//! Deck names are user-chosen and may contain characters that carry
//! meaning in Anki's search language. [`QueryBuilder::deck_exact`] always
//! quotes the name and escapes those characters, so a deck called
//! `Say "hi"` or `snake_case` only ever matches itself.
//!
//! # Example
//!
//! ```
//! use deckstat_connect::QueryBuilder;
//!
//! let query = QueryBuilder::new().deck_exact("Spanish").is_new().build();
//! assert_eq!(query, "deck:\"Spanish\" is:new");
//!
//! let query = QueryBuilder::new().deck_exact("Say \"hi\"").build();
//! assert_eq!(query, r#"deck:"Say \"hi\"""#);
//! ```

use std::fmt;

/// A builder for constructing Anki search queries.
#[derive(Debug, Clone, Default)]
#[must_use = "QueryBuilder does nothing until .build() is called"]
pub struct QueryBuilder {
    parts: Vec<String>,
}

impl QueryBuilder {
    /// Create a new empty query builder.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Match cards in exactly this deck (and, as Anki does, its subdecks).
    ///
    /// The name is always quoted. Backslashes, double quotes, and the
    /// wildcards `*` and `_` are escaped so they match literally.
    /// Hierarchical names use the usual `::` separator.
    ///
    /// ```
    /// use deckstat_connect::QueryBuilder;
    ///
    /// let q = QueryBuilder::new().deck_exact("Languages::Italian").build();
    /// assert_eq!(q, "deck:\"Languages::Italian\"");
    ///
    /// let q = QueryBuilder::new().deck_exact("verbs_*").build();
    /// assert_eq!(q, r#"deck:"verbs\_\*""#);
    /// ```
    pub fn deck_exact(mut self, name: &str) -> Self {
        self.parts.push(format!("deck:\"{}\"", escape_literal(name)));
        self
    }

    /// Filter for new cards (never reviewed).
    pub fn is_new(mut self) -> Self {
        self.parts.push("is:new".to_string());
        self
    }

    /// Add a raw query fragment, unescaped.
    pub fn raw(mut self, query: &str) -> Self {
        self.parts.push(query.to_string());
        self
    }

    /// Build the final query string.
    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join(" "))
    }
}

/// Escape a value so Anki treats every character literally inside quotes.
fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '*' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
