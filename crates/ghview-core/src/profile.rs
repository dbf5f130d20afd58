//! Domain records for a looked-up account and its repositories.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of an upstream account, replaced wholesale on every lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Canonical login as returned upstream. Identity is case-insensitive.
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub email: Option<String>,
    pub hireable: bool,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub public_gists: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// One public repository belonging to a [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    /// Free-text language label; `None` when upstream could not detect one.
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Ordering requested for the repository listing. Always descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Stars,
    Forks,
    Updated,
}

impl SortKey {
    /// The value the upstream `sort` query parameter expects.
    ///
    /// A stars request is sent as `stars`, not as the `stargazers_count`
    /// field name the repository records carry.
    #[must_use]
    pub const fn api_param(self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_param())
    }
}

/// Error returned when a string does not name a [`SortKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key \"{0}\" (expected stars, forks or updated)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stars" | "stargazers_count" => Ok(Self::Stars),
            "forks" | "forks_count" => Ok(Self::Forks),
            "updated" | "updated_at" | "recently-updated" => Ok(Self::Updated),
            _ => Err(ParseSortKeyError(s.to_owned())),
        }
    }
}
