//! What to count and where to read it from.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// A non-negative card count.
pub type Count = u64;

/// The statistic to report for a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Cards never studied.
    New,
    /// Every card in the deck.
    Total,
    /// Cards studied at least once: `total - new`.
    Seen,
}

impl MetricKind {
    /// All metric kinds, in report order.
    pub const ALL: [MetricKind; 3] = [MetricKind::New, MetricKind::Total, MetricKind::Seen];

    /// The lowercase name used on the command line and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::New => "new",
            MetricKind::Total => "total",
            MetricKind::Seen => "seen",
        }
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    /// Parse `new`, `total` or `seen`. Matching is exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(MetricKind::New),
            "total" => Ok(MetricKind::Total),
            "seen" => Ok(MetricKind::Seen),
            _ => Err(Error::InvalidMetricKind(s.to_string())),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which data source to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// AnkiConnect, while Anki is running.
    Online,
    /// The collection file, while Anki is closed.
    Offline,
    /// Online first, offline when AnkiConnect is not reachable.
    #[default]
    Auto,
}

impl Mode {
    /// Map the plain online/offline switch onto a mode.
    pub fn from_online_flag(online: bool) -> Self {
        if online { Mode::Online } else { Mode::Offline }
    }

    /// The lowercase name used on the command line and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Online => "online",
            Mode::Offline => "offline",
            Mode::Auto => "auto",
        }
    }
}

impl From<bool> for Mode {
    fn from(online: bool) -> Self {
        Mode::from_online_flag(online)
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Mode::Online),
            "offline" => Ok(Mode::Offline),
            "auto" => Ok(Mode::Auto),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which cards of a deck an accessor counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardScope {
    /// Every card.
    All,
    /// Only new cards.
    New,
}
