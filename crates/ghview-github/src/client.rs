//! HTTP client for the GitHub REST API.
//!
//! Wraps `reqwest` with status-to-error mapping and typed response
//! deserialization for the two endpoints the viewer needs. 404 and 403/429
//! surface as [`GithubError::NotFound`] and [`GithubError::RateLimited`];
//! nothing is retried.

use std::future::Future;
use std::time::Duration;

use ghview_core::{AppConfig, FetchError, ProfileSource, Repository, SortKey, UserProfile};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::GithubError;
use crate::types::{GithubRepository, GithubUser};

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

/// Client for the GitHub REST API.
///
/// Use [`GithubClient::from_config`] in the binary or
/// [`GithubClient::with_base_url`] to point at a mock server in tests.
pub struct GithubClient {
    client: Client,
    base_url: Url,
}

impl GithubClient {
    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidBaseUrl`] if the configured base URL
    /// cannot be parsed, or [`GithubError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, GithubError> {
        Self::with_base_url(
            &config.api_base_url,
            &config.user_agent,
            config.github_token.as_deref(),
            config.request_timeout_secs,
        )
    }

    /// Creates a client against `base_url`.
    ///
    /// `timeout_secs = None` keeps reqwest's default (no overall timeout).
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, [`GithubError::InvalidToken`] if `token` cannot
    /// be sent as a header, and [`GithubError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        token: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, GithubError> {
        let base_url = parse_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| GithubError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Fetches a user record by username.
    ///
    /// # Errors
    ///
    /// - [`GithubError::NotFound`] on HTTP 404.
    /// - [`GithubError::RateLimited`] on HTTP 403 or 429.
    /// - [`GithubError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`GithubError::Http`] on network failure.
    /// - [`GithubError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_user(&self, username: &str) -> Result<GithubUser, GithubError> {
        let url = self.user_url(username)?;
        self.get_json(url, &format!("user {username}")).await
    }

    /// Fetches up to `per_page` repositories of `login`, sorted by `sort`
    /// descending.
    ///
    /// # Errors
    ///
    /// Same as [`GithubClient::fetch_user`].
    pub async fn fetch_repositories(
        &self,
        login: &str,
        sort: SortKey,
        per_page: u8,
    ) -> Result<Vec<GithubRepository>, GithubError> {
        let url = self.repos_url(login, sort, per_page)?;
        self.get_json(url, &format!("repositories of {login}")).await
    }

    fn user_url(&self, username: &str) -> Result<Url, GithubError> {
        self.endpoint(&["users", username])
    }

    fn repos_url(&self, login: &str, sort: SortKey, per_page: u8) -> Result<Url, GithubError> {
        let mut url = self.endpoint(&["users", login, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", sort.api_param())
            .append_pair("direction", "desc")
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GithubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GithubError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request, maps non-2xx statuses to typed errors, and parses
    /// the body as JSON.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, GithubError> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(GithubError::NotFound {
                url: url.to_string(),
            });
        }

        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            let remaining = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                remaining = remaining.as_deref(),
                "GitHub rate limit hit"
            );
            return Err(GithubError::RateLimited {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(GithubError::UnexpectedStatus {
                status: status.as_u16(),
                reason: status_text(status),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GithubError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Canonical reason phrase, or the bare code for unregistered statuses.
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_u16().to_string(), str::to_owned)
}

/// Parses and validates the API base URL. A trailing slash is tolerated.
fn parse_base_url(raw: &str) -> Result<Url, GithubError> {
    let url = Url::parse(raw.trim()).map_err(|e| GithubError::InvalidBaseUrl {
        base_url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(GithubError::InvalidBaseUrl {
            base_url: raw.to_owned(),
            reason: "expected an absolute http(s) URL".to_owned(),
        });
    }
    Ok(url)
}

impl ProfileSource for GithubClient {
    fn fetch_user(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<UserProfile, FetchError>> + Send {
        async move {
            let user = GithubClient::fetch_user(self, username).await?;
            Ok(UserProfile::from(user))
        }
    }

    fn fetch_repositories(
        &self,
        login: &str,
        sort: SortKey,
        limit: u8,
    ) -> impl Future<Output = Result<Vec<Repository>, FetchError>> + Send {
        async move {
            let repos = GithubClient::fetch_repositories(self, login, sort, limit).await?;
            Ok(repos.into_iter().map(Repository::from).collect())
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
