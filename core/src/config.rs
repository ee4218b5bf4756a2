//! Client configuration, read from the environment with local defaults.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_ERROR_MESSAGE: &str = "Произошла ошибка при выполнении запроса";

const BASE_URL_VAR: &str = "MEDCARD_API_URL";
const TIMEOUT_VAR: &str = "MEDCARD_API_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Stored without a trailing slash; endpoint paths start with `/`.
    pub base_url: String,
    pub timeout: Duration,
    /// Used when an error response carries no readable message.
    pub fallback_error_message: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            fallback_error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }

    /// `MEDCARD_API_URL` and `MEDCARD_API_TIMEOUT_SECS`, falling back to the
    /// local development server. An unparsable timeout is ignored.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url);
        if let Some(secs) = std::env::var(TIMEOUT_VAR)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fallback_error_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_error_message = message.into();
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ApiConfig::new("https://api.example.com/");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.url("/analyses"), "https://api.example.com/analyses");
    }

    #[test]
    fn default_points_at_local_server() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.fallback_error_message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn builders_override_defaults() {
        let config = ApiConfig::new("http://x")
            .with_timeout(Duration::from_secs(5))
            .with_fallback_error_message("Request failed");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.fallback_error_message, "Request failed");
    }
}
