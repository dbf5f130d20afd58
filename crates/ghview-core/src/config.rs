use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "ghview/0.1 (profile-viewer)";

/// Reads `GITHUB_TOKEN` and the `GHVIEW_*` settings, after merging a `.env`
/// file from the working directory (via `dotenvy`) into the process
/// environment. Variables already set in the environment win over `.env`.
///
/// # Errors
///
/// Returns `ConfigError` when `GHVIEW_API_BASE_URL` or
/// `GHVIEW_REQUEST_TIMEOUT_SECS` is set to something unusable.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] but skips `.env`; only the live process
/// environment is consulted.
///
/// # Errors
///
/// Returns `ConfigError` under the same conditions as [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Default location of the state file: the platform data directory, or
/// `./.ghview/state.json` when no home directory can be determined.
#[must_use]
pub fn default_state_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "ghview").map_or_else(
        || PathBuf::from(".ghview").join("state.json"),
        |dirs| dirs.data_dir().join("state.json"),
    )
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        optional(var)
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    };

    let github_token = optional("GITHUB_TOKEN");

    let api_base_url = or_default("GHVIEW_API_BASE_URL", DEFAULT_API_BASE_URL);
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GHVIEW_API_BASE_URL".to_string(),
            reason: format!("\"{api_base_url}\" is not an http(s) URL"),
        });
    }

    let user_agent = or_default("GHVIEW_USER_AGENT", DEFAULT_USER_AGENT);
    let request_timeout_secs = parse_optional_u64("GHVIEW_REQUEST_TIMEOUT_SECS")?;
    let log_level = or_default("GHVIEW_LOG_LEVEL", "warn");
    let state_path = optional("GHVIEW_STATE_PATH").map_or_else(default_state_path, PathBuf::from);

    Ok(AppConfig {
        github_token,
        api_base_url,
        user_agent,
        request_timeout_secs,
        log_level,
        state_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
