//! Client configuration

use crate::{ClientError, ClientResult, HttpClient};
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the review backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8000/api")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Log level (e.g., "info", "debug")
    pub log_level: String,

    /// JSON log output instead of pretty
    pub log_json: bool,

    /// Directory for daily rotating log files
    pub log_dir: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_json: false,
            log_dir: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | REVIEW_API_URL | http://localhost:8000/api |
    /// | REVIEW_API_TOKEN | (none) |
    /// | REVIEW_TIMEOUT_SECS | 30 |
    /// | LOG_LEVEL | info |
    /// | LOG_JSON | false |
    /// | LOG_DIR | (none) |
    pub fn from_env() -> ClientResult<Self> {
        let timeout = match non_empty_var("REVIEW_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ClientError::Config(format!("REVIEW_TIMEOUT_SECS is not a number: {raw}")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: non_empty_var("REVIEW_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: non_empty_var("REVIEW_API_TOKEN"),
            timeout,
            log_level: non_empty_var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json: non_empty_var("LOG_JSON").is_some_and(|v| parse_flag(&v)),
            log_dir: non_empty_var("LOG_DIR"),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
