//! Result types emitted by the lookup flow to the presenter.

use crate::error::{ErrorKind, FetchError};
use crate::profile::{Repository, SortKey, UserProfile};
use crate::summarize::LanguageAggregate;

/// Message shown in the repository section when the listing could not be fetched.
pub const REPOSITORY_FETCH_FAILED: &str = "Could not fetch repositories.";

/// State of the repository section of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryStatus {
    /// At least one repository was returned.
    Loaded,
    /// The fetch succeeded and the account has no public repositories.
    Empty,
    /// The fetch failed; the profile is still shown.
    Degraded { message: String },
}

/// Repository listing plus its language aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySection {
    /// Canonical login the listing belongs to.
    pub login: String,
    pub sort: SortKey,
    pub repositories: Vec<Repository>,
    pub languages: LanguageAggregate,
    pub status: RepositoryStatus,
}

impl RepositorySection {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, RepositoryStatus::Degraded { .. })
    }
}

/// Everything the presenter needs to render a found profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub profile: UserProfile,
    pub section: RepositorySection,
}

/// A lookup that aborted before a profile could be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl LookupFailure {
    /// Fixed heading for the error panel.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.kind {
            ErrorKind::NotFound => "User Not Found",
            ErrorKind::RateLimited => "Rate Limit Exceeded",
            ErrorKind::UpstreamError => "An Error Occurred",
        }
    }

    /// Body text for the error panel. Only the generic upstream case shows
    /// the raw message.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self.kind {
            ErrorKind::NotFound => "We couldn't find a user with that name. Please try again.",
            ErrorKind::RateLimited => {
                "You've made too many requests. Please wait a moment and try again."
            }
            ErrorKind::UpstreamError => &self.message,
        }
    }
}

impl From<FetchError> for LookupFailure {
    fn from(err: FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Success(Box<ProfileView>),
    Failure(LookupFailure),
}

impl LookupResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn failure_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure.kind),
        }
    }
}

/// What a call into the flow amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Blank input; nothing was requested or rendered.
    Ignored,
    /// A newer request was issued before this one finished; its result was
    /// discarded without rendering.
    Superseded,
    /// A full lookup finished and its result was rendered.
    Completed(LookupResult),
    /// A re-sort of the current subject's repositories finished and was rendered.
    Resorted(RepositorySection),
}
