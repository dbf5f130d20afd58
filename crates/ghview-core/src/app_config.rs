use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// Personal access token; raises the upstream rate limit when present.
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub user_agent: String,
    /// `None` leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
    pub state_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("state_path", &self.state_path)
            .finish()
    }
}
