//! Projection of raw upstream records into display-ready fields.
//!
//! Every optional field becomes a [`ProjectedField`]: the text to show, a
//! flag telling the presenter the text is a fallback (so it can be styled
//! as such), and an optional link. A `None` link is inert and must not
//! navigate anywhere.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chart::language_color;
use crate::profile::{Repository, UserProfile};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_BIO: &str = "No bio available";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_WEBSITE: &str = "No website";
pub const NO_TWITTER: &str = "No Twitter";
pub const NO_EMAIL: &str = "No public email";
pub const NO_DESCRIPTION: &str = "No description available";

const TWITTER_PROFILE_BASE: &str = "https://twitter.com/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedField {
    pub text: String,
    pub is_defaulted: bool,
    pub link: Option<String>,
}

impl ProjectedField {
    fn present(text: impl Into<String>, link: Option<String>) -> Self {
        Self {
            text: text.into(),
            is_defaulted: false,
            link,
        }
    }

    fn fallback(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            is_defaulted: true,
            link: None,
        }
    }
}

/// Which of the two date renderings to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `Jan 5, 2021`, used for repository update times.
    Short,
    /// `January 5, 2021`, used for account creation.
    Long,
}

/// Treats missing and whitespace-only upstream strings alike.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Plain optional text (bio, location, company).
#[must_use]
pub fn project_text(value: Option<&str>, fallback: &str) -> ProjectedField {
    match non_blank(value) {
        Some(text) => ProjectedField::present(text, None),
        None => ProjectedField::fallback(fallback),
    }
}

/// Website field. Values without a scheme are linked over `https://`.
#[must_use]
pub fn project_blog(value: Option<&str>) -> ProjectedField {
    match non_blank(value) {
        Some(blog) => ProjectedField::present(blog, Some(normalize_blog_url(blog))),
        None => ProjectedField::fallback(NO_WEBSITE),
    }
}

#[must_use]
pub fn normalize_blog_url(blog: &str) -> String {
    if blog.contains("://") {
        blog.to_owned()
    } else {
        format!("https://{blog}")
    }
}

#[must_use]
pub fn project_twitter(handle: Option<&str>) -> ProjectedField {
    match non_blank(handle).map(|h| h.trim_start_matches('@')) {
        Some(handle) if !handle.is_empty() => ProjectedField::present(
            format!("@{handle}"),
            Some(format!("{TWITTER_PROFILE_BASE}{handle}")),
        ),
        _ => ProjectedField::fallback(NO_TWITTER),
    }
}

#[must_use]
pub fn project_email(value: Option<&str>) -> ProjectedField {
    match non_blank(value) {
        Some(email) => ProjectedField::present(email, Some(format!("mailto:{email}"))),
        None => ProjectedField::fallback(NO_EMAIL),
    }
}

/// Parses an upstream RFC 3339 timestamp. Unparseable input yields `None`.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[must_use]
pub fn format_date(ts: Option<DateTime<Utc>>, style: DateStyle) -> String {
    let Some(ts) = ts else {
        return NOT_AVAILABLE.to_owned();
    };
    match style {
        DateStyle::Short => ts.format("%b %-d, %Y").to_string(),
        DateStyle::Long => ts.format("%B %-d, %Y").to_string(),
    }
}

/// Display form of a [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub display_name: String,
    pub handle: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub hireable: bool,
    pub bio: ProjectedField,
    pub location: ProjectedField,
    pub company: ProjectedField,
    pub blog: ProjectedField,
    pub twitter: ProjectedField,
    pub email: ProjectedField,
    pub joined: ProjectedField,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub public_gists: u64,
}

#[must_use]
pub fn project_profile(user: &UserProfile) -> ProfileCard {
    let joined = match user.created_at {
        Some(ts) => ProjectedField::present(format_date(Some(ts), DateStyle::Long), None),
        None => ProjectedField::fallback(NOT_AVAILABLE),
    };

    ProfileCard {
        display_name: non_blank(user.name.as_deref())
            .unwrap_or(&user.login)
            .to_owned(),
        handle: format!("@{}", user.login),
        avatar_url: user.avatar_url.clone(),
        profile_url: user.html_url.clone(),
        hireable: user.hireable,
        bio: project_text(user.bio.as_deref(), NO_BIO),
        location: project_text(user.location.as_deref(), NOT_SPECIFIED),
        company: project_text(user.company.as_deref(), NOT_SPECIFIED),
        blog: project_blog(user.blog.as_deref()),
        twitter: project_twitter(user.twitter_username.as_deref()),
        email: project_email(user.email.as_deref()),
        joined,
        followers: user.followers,
        following: user.following,
        public_repos: user.public_repos,
        public_gists: user.public_gists,
    }
}

/// Display form of a [`Repository`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryCard {
    pub name: String,
    pub url: String,
    pub description: ProjectedField,
    /// Label and palette color, only when the repository declares a language.
    pub language: Option<(String, &'static str)>,
    pub stars: u64,
    pub forks: u64,
    pub updated: String,
}

#[must_use]
pub fn project_repository(repo: &Repository) -> RepositoryCard {
    RepositoryCard {
        name: repo.name.clone(),
        url: repo.html_url.clone(),
        description: project_text(repo.description.as_deref(), NO_DESCRIPTION),
        language: non_blank(repo.language.as_deref())
            .map(|lang| (lang.to_owned(), language_color(lang))),
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        updated: format_date(repo.updated_at, DateStyle::Short),
    }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
