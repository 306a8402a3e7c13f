// src/utils/config.rs
use std::time::Duration;

// arXiv asks automated clients to identify themselves and to go slowly.
const DEFAULT_HTML_BASE: &str = "https://arxiv.org/html";
const DEFAULT_USER_AGENT: &str = concat!("arxiv-ereader/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_DELAY_MS: u64 = 150;
const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Settings for talking to arXiv.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Prefix that paper ids are appended to, without a trailing slash.
    pub html_base: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Pause before every request.
    pub request_delay: Duration,
    pub max_concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            html_base: DEFAULT_HTML_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl FetchConfig {
    /// Defaults overridden by `ARXIV_HTML_BASE`, `ARXIV_USER_AGENT`,
    /// `ARXIV_REQUEST_DELAY_MS` and `ARXIV_MAX_CONCURRENCY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FetchConfig::from_env`] but reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("ARXIV_HTML_BASE").filter(|v| !v.trim().is_empty()) {
            config.html_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(agent) = lookup("ARXIV_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent.trim().to_string();
        }
        if let Some(raw) = lookup("ARXIV_REQUEST_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.request_delay = Duration::from_millis(ms),
                Err(_) => tracing::warn!("Ignoring invalid ARXIV_REQUEST_DELAY_MS value: {}", raw),
            }
        }
        if let Some(raw) = lookup("ARXIV_MAX_CONCURRENCY") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_concurrency = n,
                _ => tracing::warn!("Ignoring invalid ARXIV_MAX_CONCURRENCY value: {}", raw),
            }
        }

        tracing::debug!("Fetch configuration: {:?}", config);
        config
    }
}
