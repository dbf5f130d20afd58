//! Per-language repository counts for the language chart.

use serde::Serialize;

use crate::profile::Repository;

/// Label used for repositories that declare no language.
pub const OTHER_LANGUAGE: &str = "Other";

/// Language label → repository count.
///
/// Entries keep first-seen order so the chart is stable across renders.
/// Every count is at least 1 and the counts sum to the number of
/// repositories summarized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageAggregate {
    entries: Vec<(String, usize)>,
}

impl LanguageAggregate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    fn increment(&mut self, label: &str) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(key, _)| key == label) {
            *count += 1;
        } else {
            self.entries.push((label.to_owned(), 1));
        }
    }
}

/// Returns the label a repository is counted under.
#[must_use]
pub fn effective_language(repo: &Repository) -> &str {
    repo.language
        .as_deref()
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(OTHER_LANGUAGE)
}

/// Counts repositories per language, folding missing languages into
/// [`OTHER_LANGUAGE`].
#[must_use]
pub fn summarize(repos: &[Repository]) -> LanguageAggregate {
    let mut aggregate = LanguageAggregate::default();
    for repo in repos {
        aggregate.increment(effective_language(repo));
    }
    aggregate
}
