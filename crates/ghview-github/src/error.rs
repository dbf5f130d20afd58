use ghview_core::FetchError;
use thiserror::Error;

/// Errors returned by the GitHub REST client.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("not found: {url}")]
    NotFound { url: String },

    /// HTTP 403 or 429. GitHub answers an exhausted rate limit with 403.
    #[error("rate limited: {url}")]
    RateLimited { url: String },

    #[error("unexpected HTTP status {status} ({reason}) from {url}")]
    UnexpectedStatus {
        status: u16,
        reason: String,
        url: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("GITHUB_TOKEN is not a valid header value: {0}")]
    InvalidToken(String),
}

impl From<GithubError> for FetchError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::NotFound { .. } => Self::NotFound,
            GithubError::RateLimited { .. } => Self::RateLimited,
            GithubError::UnexpectedStatus { reason, .. } => Self::Upstream(reason),
            other @ (GithubError::Http(_)
            | GithubError::Deserialize { .. }
            | GithubError::InvalidBaseUrl { .. }
            | GithubError::InvalidToken(_)) => Self::Upstream(other.to_string()),
        }
    }
}
