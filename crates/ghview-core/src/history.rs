//! Recent-search list and display theme, the two pieces of persisted state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum number of usernames kept in [`SearchHistory`].
pub const HISTORY_LIMIT: usize = 5;

/// Most-recent-first list of distinct usernames (case-insensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    /// Builds a history from a persisted list, restoring the invariants if
    /// the stored list was edited by hand: later case-insensitive duplicates
    /// are dropped and the list is cut to [`HISTORY_LIMIT`].
    #[must_use]
    pub fn from_entries(stored: Vec<String>) -> Self {
        let mut entries: Vec<String> = Vec::with_capacity(HISTORY_LIMIT);
        for name in stored {
            if name.trim().is_empty() || entries.iter().any(|e| e.eq_ignore_ascii_case(&name)) {
                continue;
            }
            entries.push(name);
            if entries.len() == HISTORY_LIMIT {
                break;
            }
        }
        Self { entries }
    }

    /// Moves `username` to the front, dropping any prior occurrence in any
    /// case and the oldest entry past the limit.
    pub fn record(&mut self, username: &str) {
        self.entries.retain(|e| !e.eq_ignore_ascii_case(username));
        self.entries.insert(0, username.to_owned());
        self.entries.truncate(HISTORY_LIMIT);
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Display theme. Passed explicitly into chart projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme \"{0}\" (expected light or dark)")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseThemeError(s.to_owned())),
        }
    }
}
