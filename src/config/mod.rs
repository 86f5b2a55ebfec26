// src/config/mod.rs
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ApiConfig {
    /// Resolve the config from the environment.
    ///
    /// `LOGSCOPE_API_URL` overrides the backend base URL (trailing slashes
    /// stripped), `LOGSCOPE_TIMEOUT_MS` the request timeout. Unparseable
    /// timeout values fall back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("LOGSCOPE_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }

        if let Ok(ms) = std::env::var("LOGSCOPE_TIMEOUT_MS") {
            match ms.trim().parse::<u64>() {
                Ok(ms) => config.timeout = Duration::from_millis(ms),
                Err(_) => log::warn!("ignoring unparseable LOGSCOPE_TIMEOUT_MS: {:?}", ms),
            }
        }

        config
    }
}
