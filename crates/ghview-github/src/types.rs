//! GitHub REST response types for the user and repository endpoints.
//!
//! Only the fields the viewer renders are modelled. GitHub sends empty
//! profile fields either as `null` or as `""` (notably `blog`); both are
//! kept as-is here and treated alike by the projector. `hireable` is `null`
//! unless the user opted in, so it defaults to `false`.

use chrono::{DateTime, Utc};
use ghview_core::{parse_timestamp, Repository, UserProfile};
use serde::Deserialize;

/// Response body of `GET /users/{username}`.
#[derive(Debug, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    pub hireable: Option<bool>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub public_gists: u64,
}

/// One element of `GET /users/{username}/repos`.
#[derive(Debug, Deserialize)]
pub struct GithubRepository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub updated_at: Option<String>,
}

fn timestamp(raw: Option<&str>, field: &'static str, owner: &str) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        tracing::warn!(owner, field, raw, "unparseable timestamp; showing N/A");
    }
    parsed
}

impl From<GithubUser> for UserProfile {
    fn from(user: GithubUser) -> Self {
        let created_at = timestamp(user.created_at.as_deref(), "created_at", &user.login);
        Self {
            login: user.login,
            name: user.name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            location: user.location,
            company: user.company,
            blog: user.blog,
            twitter_username: user.twitter_username,
            email: user.email,
            hireable: user.hireable.unwrap_or(false),
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            public_gists: user.public_gists,
            created_at,
        }
    }
}

impl From<GithubRepository> for Repository {
    fn from(repo: GithubRepository) -> Self {
        let updated_at = timestamp(repo.updated_at.as_deref(), "updated_at", &repo.name);
        Self {
            name: repo.name,
            description: repo.description,
            html_url: repo.html_url,
            language: repo.language,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            updated_at,
        }
    }
}
