//! Line-driven session: each line is a username or a `:command`.
//!
//! Lookups run as independent tasks, so a new username can be entered while
//! an earlier lookup is still waiting on the network. The flow discards the
//! older result.

use std::io;
use std::sync::Arc;

use ghview_core::{
    LookupOutcome, PreferenceStore, ProfileLookupFlow, SearchHistory, SortKey, StoreError,
};
use ghview_github::GithubClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinSet};

use crate::presenter::TerminalPresenter;
use crate::store::JsonFileStore;

pub type CliFlow =
    ProfileLookupFlow<GithubClient, Arc<JsonFileStore>, Arc<TerminalPresenter<io::Stdout>>>;

const HELP: &str = "\
Enter a GitHub username to look it up, or one of:
  :sort <stars|forks|updated>  re-sort the repositories on display
  :theme                       toggle light/dark
  :history                     list recent searches
  :clear                       clear recent searches
  :help                        show this message
  :quit                        exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Blank,
    Lookup(String),
    Sort(SortKey),
    ToggleTheme,
    History,
    ClearHistory,
    Help,
    Quit,
    Invalid(String),
}

#[must_use]
pub fn parse_line(line: &str) -> Input {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return if line.is_empty() {
            Input::Blank
        } else {
            Input::Lookup(line.to_owned())
        };
    };

    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
        (Some("q" | "quit" | "exit"), None) => Input::Quit,
        (Some("theme"), None) => Input::ToggleTheme,
        (Some("history"), None) => Input::History,
        (Some("clear"), None) => Input::ClearHistory,
        (Some("help" | "h"), None) => Input::Help,
        (Some("sort"), Some(key)) => match key.parse() {
            Ok(sort) => Input::Sort(sort),
            Err(e) => Input::Invalid(e.to_string()),
        },
        (Some("sort"), None) => Input::Invalid("usage: :sort <stars|forks|updated>".to_owned()),
        _ => Input::Invalid(format!("unknown command \":{command}\" (try :help)")),
    }
}

/// Numbered listing of the stored history, most recent first.
///
/// # Errors
///
/// Returns [`StoreError`] when the history cannot be read.
pub fn history_text(store: &impl PreferenceStore) -> Result<String, StoreError> {
    let history = SearchHistory::from_entries(store.load_history()?);
    if history.is_empty() {
        return Ok("No recent searches.".to_owned());
    }
    Ok(history
        .entries()
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>2}. {name}", i + 1))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn log_finished(joined: Result<LookupOutcome, JoinError>) {
    match joined {
        Ok(outcome) => tracing::debug!(?outcome, "lookup task finished"),
        Err(e) if e.is_cancelled() => {}
        Err(e) => tracing::error!(error = %e, "lookup task failed"),
    }
}

/// Runs the session until `:quit` or end of input.
///
/// On end of input, lookups still in flight are awaited; `:quit` aborts them.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub async fn run(flow: Arc<CliFlow>, mut sort: SortKey) -> anyhow::Result<()> {
    let presenter = Arc::clone(flow.presenter());
    presenter.notice("Type a GitHub username, or :help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = JoinSet::new();
    let mut quit = false;

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Input::Blank => {}
            Input::Lookup(username) => {
                let flow = Arc::clone(&flow);
                tasks.spawn(async move { flow.lookup(&username, sort).await });
            }
            Input::Sort(key) => {
                sort = key;
                let flow = Arc::clone(&flow);
                tasks.spawn(async move { flow.resort(key).await });
            }
            Input::ToggleTheme => {
                let theme = presenter.theme().toggle();
                presenter.set_theme(theme);
                if let Err(e) = flow.store().save_theme(theme) {
                    tracing::warn!(error = %e, "could not save theme");
                }
                presenter.notice(&format!("Theme: {theme}"));
            }
            Input::History => match history_text(flow.store()) {
                Ok(text) => presenter.notice(&text),
                Err(e) => presenter.notice(&format!("Could not read history: {e}")),
            },
            Input::ClearHistory => match flow.store().clear_history() {
                Ok(()) => presenter.notice("Recent searches cleared."),
                Err(e) => presenter.notice(&format!("Could not clear history: {e}")),
            },
            Input::Help => presenter.notice(HELP),
            Input::Invalid(message) => presenter.notice(&message),
            Input::Quit => {
                quit = true;
                break;
            }
        }

        while let Some(joined) = tasks.try_join_next() {
            log_finished(joined);
        }
    }

    if quit {
        tasks.abort_all();
    }
    while let Some(joined) = tasks.join_next().await {
        log_finished(joined);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_lookup() {
        assert_eq!(parse_line("  octocat \n"), Input::Lookup("octocat".to_owned()));
        assert_eq!(parse_line("   "), Input::Blank);
    }

    #[test]
    fn sort_command_parses_key() {
        assert_eq!(parse_line(":sort forks"), Input::Sort(SortKey::Forks));
        assert_eq!(
            parse_line(":sort recently-updated"),
            Input::Sort(SortKey::Updated)
        );
        assert!(matches!(parse_line(":sort"), Input::Invalid(_)));
        assert!(matches!(parse_line(":sort size"), Input::Invalid(_)));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_line(":theme"), Input::ToggleTheme);
        assert_eq!(parse_line(":history"), Input::History);
        assert_eq!(parse_line(":clear"), Input::ClearHistory);
        assert_eq!(parse_line(":help"), Input::Help);
        assert_eq!(parse_line(":q"), Input::Quit);
        assert_eq!(parse_line(":quit"), Input::Quit);
    }

    #[test]
    fn unknown_command_is_invalid() {
        let Input::Invalid(message) = parse_line(":frobnicate") else {
            panic!("expected invalid input");
        };
        assert!(message.contains(":frobnicate"));
    }

    #[test]
    fn history_text_lists_most_recent_first() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert_eq!(history_text(&store).unwrap(), "No recent searches.");

        store
            .save_history(&["torvalds".to_owned(), "octocat".to_owned()])
            .unwrap();
        assert_eq!(history_text(&store).unwrap(), " 1. torvalds\n 2. octocat");
    }
}
