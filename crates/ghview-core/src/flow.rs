//! Profile lookup orchestration.
//!
//! `lookup` runs validate → fetch user → fetch repositories (with the
//! canonical login) → summarize → record history → render. Each call takes a
//! generation token; after every await the token is compared with the
//! latest one and a stale call returns [`LookupOutcome::Superseded`]
//! without rendering, so the most recently issued lookup always wins.
//!
//! The final check and the commit that follows it run under the subject
//! lock, which is also taken when a lookup begins. On a multi-threaded
//! runtime a newer lookup therefore either starts before the commit (and the
//! commit is skipped) or after it (and renders later).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::history::SearchHistory;
use crate::lookup::{
    LookupFailure, LookupOutcome, LookupResult, ProfileView, RepositorySection,
    RepositoryStatus, REPOSITORY_FETCH_FAILED,
};
use crate::ports::{PreferenceStore, Presenter, ProfileSource};
use crate::profile::SortKey;
use crate::summarize::summarize;

/// Number of repositories requested per lookup.
pub const REPOSITORY_LIMIT: u8 = 6;

pub struct ProfileLookupFlow<S, H, P> {
    source: S,
    store: H,
    presenter: P,
    generation: AtomicU64,
    /// Canonical login of the last lookup that completed successfully and
    /// has not been superseded. Cleared whenever a new lookup starts.
    subject: Mutex<Option<String>>,
}

impl<S, H, P> ProfileLookupFlow<S, H, P>
where
    S: ProfileSource,
    H: PreferenceStore,
    P: Presenter,
{
    #[must_use]
    pub fn new(source: S, store: H, presenter: P) -> Self {
        Self {
            source,
            store,
            presenter,
            generation: AtomicU64::new(0),
            subject: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn store(&self) -> &H {
        &self.store
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Canonical login of the profile currently on display, if any.
    #[must_use]
    pub fn current_subject(&self) -> Option<String> {
        self.lock_subject().clone()
    }

    /// Looks up `raw_input` and renders the result.
    ///
    /// Blank input is ignored. Step 1 failures abort with a
    /// [`LookupResult::Failure`]; a failed repository fetch still yields
    /// [`LookupResult::Success`] with [`RepositoryStatus::Degraded`].
    pub async fn lookup(&self, raw_input: &str, sort: SortKey) -> LookupOutcome {
        let username = raw_input.trim();
        if username.is_empty() {
            return LookupOutcome::Ignored;
        }

        let token = self.begin_lookup();
        self.presenter.render_loading(true);
        tracing::debug!(username, token, %sort, "starting profile lookup");

        let fetched = self.source.fetch_user(username).await;
        if !self.is_current(token) {
            tracing::debug!(username, token, "discarding superseded user response");
            return LookupOutcome::Superseded;
        }

        let profile = match fetched {
            Ok(profile) => profile,
            Err(err) => {
                tracing::info!(username, kind = %err.kind(), error = %err, "profile lookup failed");
                let result = LookupResult::Failure(LookupFailure::from(err));
                if self.commit(token, |_| self.finish(&result)).is_none() {
                    tracing::debug!(username, token, "discarding superseded failure");
                    return LookupOutcome::Superseded;
                }
                return LookupOutcome::Completed(result);
            }
        };

        let section = self.load_section(&profile.login, sort).await;
        let login = profile.login.clone();
        let result = LookupResult::Success(Box::new(ProfileView { profile, section }));

        let committed = self.commit(token, |subject| {
            self.record_history(&login);
            *subject = Some(login.clone());
            if let LookupResult::Success(view) = &result {
                tracing::info!(
                    login = %login,
                    repositories = view.section.repositories.len(),
                    degraded = view.section.is_degraded(),
                    "profile lookup complete"
                );
            }
            self.finish(&result);
        });
        if committed.is_none() {
            tracing::debug!(login = %login, token, "discarding superseded repository response");
            return LookupOutcome::Superseded;
        }
        LookupOutcome::Completed(result)
    }

    /// Re-fetches the current subject's repositories under a new sort key
    /// and renders only the repository section.
    ///
    /// Returns [`LookupOutcome::Ignored`] when no profile is on display,
    /// including while a lookup is still in flight.
    pub async fn resort(&self, sort: SortKey) -> LookupOutcome {
        let (login, token) = {
            let subject = self.lock_subject();
            let Some(login) = subject.clone() else {
                return LookupOutcome::Ignored;
            };
            (login, self.generation.fetch_add(1, Ordering::SeqCst) + 1)
        };
        tracing::debug!(login = %login, token, %sort, "re-sorting repositories");

        let section = self.load_section(&login, sort).await;
        if self
            .commit(token, |_| self.presenter.render_repositories(&section))
            .is_none()
        {
            tracing::debug!(login = %login, token, "discarding superseded re-sort");
            return LookupOutcome::Superseded;
        }
        LookupOutcome::Resorted(section)
    }

    async fn load_section(&self, login: &str, sort: SortKey) -> RepositorySection {
        let (repositories, status) = match self
            .source
            .fetch_repositories(login, sort, REPOSITORY_LIMIT)
            .await
        {
            Ok(repos) if repos.is_empty() => (repos, RepositoryStatus::Empty),
            Ok(repos) => (repos, RepositoryStatus::Loaded),
            Err(err) => {
                tracing::warn!(login, error = %err, "repository fetch failed; showing profile without repositories");
                (
                    Vec::new(),
                    RepositoryStatus::Degraded {
                        message: REPOSITORY_FETCH_FAILED.to_owned(),
                    },
                )
            }
        };

        RepositorySection {
            login: login.to_owned(),
            sort,
            languages: summarize(&repositories),
            repositories,
            status,
        }
    }

    /// Appends `login` to the persisted history. Storage problems are logged
    /// and never fail the lookup.
    fn record_history(&self, login: &str) {
        let stored = match self.store.load_history() {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(error = %err, "could not read search history; starting fresh");
                Vec::new()
            }
        };
        let mut history = SearchHistory::from_entries(stored);
        history.record(login);
        if let Err(err) = self.store.save_history(history.entries()) {
            tracing::warn!(login, error = %err, "could not save search history");
        }
    }

    fn finish(&self, result: &LookupResult) {
        self.presenter.render(result);
        self.presenter.render_loading(false);
    }

    /// Issues a new token and clears the subject in one step, so no older
    /// lookup can commit in between.
    fn begin_lookup(&self) -> u64 {
        let mut subject = self.lock_subject();
        *subject = None;
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    /// Runs `apply` only if `token` is still the latest one. The subject lock
    /// is held throughout, so a newer lookup cannot begin until the commit
    /// (history write, subject update, rendering) has finished.
    fn commit<T>(&self, token: u64, apply: impl FnOnce(&mut Option<String>) -> T) -> Option<T> {
        let mut subject = self.lock_subject();
        if !self.is_current(token) {
            return None;
        }
        Some(apply(&mut subject))
    }

    fn lock_subject(&self) -> MutexGuard<'_, Option<String>> {
        self.subject.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "flow_test.rs"]
mod tests;
