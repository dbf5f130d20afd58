mod interactive;
mod presenter;
mod store;

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ghview_core::{AppConfig, LookupOutcome, PreferenceStore, ProfileLookupFlow, SortKey, Theme};
use ghview_github::GithubClient;
use tracing_subscriber::EnvFilter;

use crate::interactive::CliFlow;
use crate::presenter::TerminalPresenter;
use crate::store::JsonFileStore;

#[derive(Debug, Parser)]
#[command(name = "ghview")]
#[command(about = "Look up GitHub profiles and their top repositories")]
struct Cli {
    /// Disable ANSI colors. Also disabled when `NO_COLOR` is set or stdout is not a terminal.
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up one user and print the profile, repositories and language chart
    Lookup {
        username: String,
        /// Repository ordering: stars, forks or updated
        #[arg(long, default_value_t = SortKey::Stars)]
        sort: SortKey,
    },
    /// Read usernames and `:commands` from stdin, one per line
    Interactive {
        #[arg(long, default_value_t = SortKey::Stars)]
        sort: SortKey,
    },
    /// Recent searches
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Display theme used for chart colors
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum HistoryCommands {
    List,
    Clear,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum ThemeCommands {
    Show,
    Set { theme: Theme },
    Toggle,
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Stored theme, or the default when none is stored or the state file is unreadable.
fn stored_theme(store: &JsonFileStore) -> Theme {
    match store.load_theme() {
        Ok(theme) => theme.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(path = %store.path().display(), error = %e, "could not read theme; using default");
            Theme::default()
        }
    }
}

fn build_flow(
    config: &AppConfig,
    store: Arc<JsonFileStore>,
    color: bool,
) -> anyhow::Result<CliFlow> {
    let client = GithubClient::from_config(config)?;
    let presenter = Arc::new(TerminalPresenter::stdout(stored_theme(&store), color));
    Ok(ProfileLookupFlow::new(client, store, presenter))
}

fn run_history(store: &JsonFileStore, command: HistoryCommands) -> anyhow::Result<()> {
    match command {
        HistoryCommands::List => println!("{}", interactive::history_text(store)?),
        HistoryCommands::Clear => {
            store.clear_history()?;
            println!("Recent searches cleared.");
        }
    }
    Ok(())
}

fn run_theme(store: &JsonFileStore, command: ThemeCommands) -> anyhow::Result<()> {
    let theme = match command {
        ThemeCommands::Show => stored_theme(store),
        ThemeCommands::Set { theme } => {
            store.save_theme(theme)?;
            theme
        }
        ThemeCommands::Toggle => {
            let theme = stored_theme(store).toggle();
            store.save_theme(theme)?;
            theme
        }
    };
    println!("{theme}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = ghview_core::load_app_config()?;
    init_tracing(&config)?;

    let color =
        !cli.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
    let store = Arc::new(JsonFileStore::new(config.state_path.clone()));
    tracing::debug!(?config, color, "configuration loaded");

    match cli.command {
        Commands::Lookup { username, sort } => {
            let flow = build_flow(&config, store, color)?;
            if let LookupOutcome::Completed(result) = flow.lookup(&username, sort).await {
                if !result.is_success() {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Interactive { sort } => {
            let flow = Arc::new(build_flow(&config, store, color)?);
            interactive::run(flow, sort).await?;
        }
        Commands::History { command } => run_history(&store, command)?,
        Commands::Theme { command } => run_theme(&store, command)?,
    }

    Ok(ExitCode::SUCCESS)
}
