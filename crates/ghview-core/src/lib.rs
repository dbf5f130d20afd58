pub mod app_config;
pub mod chart;
pub mod config;
pub mod error;
pub mod flow;
pub mod history;
pub mod lookup;
pub mod ports;
pub mod profile;
pub mod project;
pub mod summarize;

pub use app_config::AppConfig;
pub use chart::{language_color, project_chart, ChartSlice, ChartSpec};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ErrorKind, FetchError, StoreError};
pub use flow::{ProfileLookupFlow, REPOSITORY_LIMIT};
pub use history::{SearchHistory, Theme, HISTORY_LIMIT};
pub use lookup::{
    LookupFailure, LookupOutcome, LookupResult, ProfileView, RepositorySection, RepositoryStatus,
};
pub use ports::{PreferenceStore, Presenter, ProfileSource};
pub use profile::{Repository, SortKey, UserProfile};
pub use project::{
    format_date, parse_timestamp, project_profile, project_repository, DateStyle, ProfileCard,
    ProjectedField, RepositoryCard,
};
pub use summarize::{summarize, LanguageAggregate, OTHER_LANGUAGE};
