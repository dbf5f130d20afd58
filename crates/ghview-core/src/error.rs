use std::fmt;

use thiserror::Error;

/// Classification of a lookup that could not produce a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The subject does not exist upstream.
    NotFound,
    /// Upstream throttled the request.
    RateLimited,
    /// Any other non-success status, transport failure or malformed body.
    UpstreamError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not-found"),
            Self::RateLimited => write!(f, "rate-limited"),
            Self::UpstreamError => write!(f, "upstream-error"),
        }
    }
}

/// Failure reported by a [`crate::ProfileSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("User not found")]
    NotFound,

    #[error("API rate limit exceeded")]
    RateLimited,

    /// Carries the status text or the underlying transport/parse message.
    #[error("{0}")]
    Upstream(String),
}

impl FetchError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::RateLimited => ErrorKind::RateLimited,
            Self::Upstream(_) => ErrorKind::UpstreamError,
        }
    }
}

/// Errors from a [`crate::PreferenceStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
