use std::time::Duration;

use crate::error::ConfigError;

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client-side limit for one analysis exchange, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Path of the analysis endpoint, appended to the base URL
pub const ANALYZE_PATH: &str = "/analyze";

pub const BASE_URL_ENV: &str = "ANALYSIS_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "ANALYSIS_TIMEOUT_MS";

/// Where the analysis service lives and how long a single call may take
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl AnalysisConfig {
    /// Build a configuration from `ANALYSIS_API_BASE_URL` and `ANALYSIS_TIMEOUT_MS`,
    /// keeping the defaults for anything unset
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_timeout(Duration::from_millis(millis));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(format!(
                "{}ms",
                self.timeout.as_millis()
            )));
        }
        Ok(())
    }

    /// Full URL of the analyze endpoint
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim().trim_end_matches('/'),
            ANALYZE_PATH
        )
    }
}
