//! Client configuration
//!
//! All settings have defaults matching the Front API's documented behavior,
//! so an empty YAML document plus a token is a usable configuration. Values
//! are taken literally; use [`ClientConfig::with_env_overrides`] to pick the
//! token up from `FRONT_API_TOKEN` instead of storing it in the file.
//!
//! ```yaml
//! base_url: https://api2.frontapp.com
//! page_size: 100
//! retry:
//!   max_retries: 2
//!   delay_ms: 2000
//!   backoff: constant     # or linear / exponential
//!   max_delay_ms: 60000
//! pacing:
//!   root_delay_ms: 200
//!   sibling_delay_ms: 100
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! ```

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API token
pub const TOKEN_ENV_VAR: &str = "FRONT_API_TOKEN";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV_VAR: &str = "FRONT_API_BASE_URL";

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api2.frontapp.com";

/// Default page size hint sent as `limit`
pub const DEFAULT_PAGE_SIZE: u32 = 100;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for API requests
    pub base_url: String,

    /// Bearer token
    pub token: Option<String>,

    /// Page size hint for paginated endpoints
    pub page_size: u32,

    /// HTTP transport settings
    pub http: HttpConfig,

    /// Retry settings for follow-up pages
    pub retry: RetryConfig,

    /// Pacing delays used while walking tag hierarchies
    pub pacing: PacingConfig,

    /// Token bucket shared by every outgoing call
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            http: HttpConfig::default(),
            retry: RetryConfig::default(),
            pacing: PacingConfig::default(),
            rate_limit: Some(RateLimiterConfig::default()),
        }
    }
}

impl ClientConfig {
    /// Create a default config with the given token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Overlay `FRONT_API_TOKEN` and `FRONT_API_BASE_URL` if set
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(TOKEN_ENV_VAR).filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        if let Some(url) = lookup(BASE_URL_ENV_VAR).filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Check the config for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base_url must not be empty"));
        }
        url::Url::parse(&self.base_url)?;

        if self.page_size == 0 {
            return Err(Error::config("page_size must be greater than zero"));
        }
        if let Some(limit) = &self.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::config(
                    "rate_limit.requests_per_second must be greater than zero",
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            user_agent: format!("front-sync/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// ============================================================================
// Retry Config
// ============================================================================

/// Retry settings for pages after the first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Base delay between attempts in milliseconds
    pub delay_ms: u64,

    /// Backoff strategy
    pub backoff: BackoffType,

    /// Cap for a single grown delay in milliseconds (never below `delay_ms`)
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay_ms: 2_000,
            backoff: BackoffType::Constant,
            max_delay_ms: 60_000,
        }
    }
}

// ============================================================================
// Pacing Config
// ============================================================================

/// Delays inserted between hierarchy requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay between successive top-level items, in milliseconds
    pub root_delay_ms: u64,

    /// Delay between successive siblings, in milliseconds
    pub sibling_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            root_delay_ms: 200,
            sibling_delay_ms: 100,
        }
    }
}

impl PacingConfig {
    /// No pacing at all (rely on the rate limiter alone)
    pub fn none() -> Self {
        Self {
            root_delay_ms: 0,
            sibling_delay_ms: 0,
        }
    }

    /// Delay between top-level items
    pub fn root_delay(&self) -> Duration {
        Duration::from_millis(self.root_delay_ms)
    }

    /// Delay between siblings
    pub fn sibling_delay(&self) -> Duration {
        Duration::from_millis(self.sibling_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryPolicy;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api2.frontapp.com");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.retry.max_retries, 2);
        assert_eq!(config.retry.delay_ms, 2_000);
        assert_eq!(config.retry.max_delay_ms, 60_000);
        assert_eq!(config.pacing.root_delay(), Duration::from_millis(200));
        assert_eq!(config.pacing.sibling_delay(), Duration::from_millis(100));
        assert!(config.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = ClientConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r"
token: abc
page_size: 25
retry:
  max_retries: 4
  backoff: exponential
pacing:
  sibling_delay_ms: 0
rate_limit: null
";
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.retry.max_retries, 4);
        assert_eq!(config.retry.delay_ms, 2_000);
        assert_eq!(config.retry.backoff, BackoffType::Exponential);
        assert_eq!(config.pacing.root_delay_ms, 200);
        assert_eq!(config.pacing.sibling_delay_ms, 0);
        assert!(config.rate_limit.is_none());
    }

    #[test]
    fn test_backoff_from_yaml_grows_delays() {
        let config = ClientConfig::from_yaml_str("retry:\n  backoff: exponential\n").unwrap();
        let policy = RetryPolicy::from(&config.retry);

        let delays: Vec<_> = (0..3).map(|n| policy.delay_for(n)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8)
            ]
        );

        let config = ClientConfig::from_yaml_str("retry:\n  backoff: linear\n").unwrap();
        let policy = RetryPolicy::from(&config.retry);
        assert_eq!(policy.delay_for(2), Duration::from_secs(6));
    }

    #[test]
    fn test_default_retry_stays_constant() {
        let policy = RetryPolicy::from(&RetryConfig::default());
        assert!((0..5).all(|n| policy.delay_for(n) == Duration::from_secs(2)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ClientConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));

        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let err = ClientConfig::from_yaml_str("base_url: ''").unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://localhost:9000\ntoken: t0k3n").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.token.as_deref(), Some("t0k3n"));
    }

    #[test]
    fn test_from_missing_file() {
        let err = ClientConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (TOKEN_ENV_VAR, "from-env"),
            (BASE_URL_ENV_VAR, "http://127.0.0.1:1"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::with_token("from-file")
            .with_overrides_from(|key| env.get(key).map(ToString::to_string));
        assert_eq!(config.token.as_deref(), Some("from-env"));
        assert_eq!(config.base_url, "http://127.0.0.1:1");

        let config =
            ClientConfig::with_token("kept").with_overrides_from(|_| Some(String::new()));
        assert_eq!(config.token.as_deref(), Some("kept"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
