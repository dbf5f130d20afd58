//! Collaborator interfaces the lookup flow drives.

use std::future::Future;
use std::sync::Arc;

use crate::error::{FetchError, StoreError};
use crate::history::Theme;
use crate::lookup::{LookupResult, RepositorySection};
use crate::profile::{Repository, SortKey, UserProfile};

/// Upstream source of user and repository records.
pub trait ProfileSource: Send + Sync {
    /// Fetches the user record for `username` exactly as typed.
    fn fetch_user(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<UserProfile, FetchError>> + Send;

    /// Fetches up to `limit` repositories of `login`, ordered by `sort`
    /// descending. Ordering is applied upstream.
    fn fetch_repositories(
        &self,
        login: &str,
        sort: SortKey,
        limit: u8,
    ) -> impl Future<Output = Result<Vec<Repository>, FetchError>> + Send;
}

/// Durable key-value storage for recent searches and the theme.
pub trait PreferenceStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be read.
    fn load_history(&self) -> Result<Vec<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be written.
    fn save_history(&self, history: &[String]) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be written.
    fn clear_history(&self) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be read.
    fn load_theme(&self) -> Result<Option<Theme>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be written.
    fn save_theme(&self, theme: Theme) -> Result<(), StoreError>;
}

/// Rendering side of the flow.
pub trait Presenter: Send + Sync {
    fn render(&self, result: &LookupResult);

    fn render_loading(&self, loading: bool);

    /// Replaces only the repository section after a re-sort.
    fn render_repositories(&self, section: &RepositorySection);
}

impl<T: ProfileSource + ?Sized> ProfileSource for Arc<T> {
    fn fetch_user(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<UserProfile, FetchError>> + Send {
        (**self).fetch_user(username)
    }

    fn fetch_repositories(
        &self,
        login: &str,
        sort: SortKey,
        limit: u8,
    ) -> impl Future<Output = Result<Vec<Repository>, FetchError>> + Send {
        (**self).fetch_repositories(login, sort, limit)
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn load_history(&self) -> Result<Vec<String>, StoreError> {
        (**self).load_history()
    }

    fn save_history(&self, history: &[String]) -> Result<(), StoreError> {
        (**self).save_history(history)
    }

    fn clear_history(&self) -> Result<(), StoreError> {
        (**self).clear_history()
    }

    fn load_theme(&self) -> Result<Option<Theme>, StoreError> {
        (**self).load_theme()
    }

    fn save_theme(&self, theme: Theme) -> Result<(), StoreError> {
        (**self).save_theme(theme)
    }
}

impl<T: Presenter + ?Sized> Presenter for Arc<T> {
    fn render(&self, result: &LookupResult) {
        (**self).render(result);
    }

    fn render_loading(&self, loading: bool) {
        (**self).render_loading(loading);
    }

    fn render_repositories(&self, section: &RepositorySection) {
        (**self).render_repositories(section);
    }
}
