//! Application configuration.
//!
//! INI-backed config with a full set of defaults, so the service runs
//! with no config file at all. Sections: `[upstream]` for the directory
//! API and its retry budget, `[cache]` for the memory store, `[server]`
//! for the HTTP bind address.

use std::path::Path;
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::client::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};

/// Default upstream base URL (the mock directory server's address).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8112/api/v1/employee";

/// Default upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default memory cache budget (64 MB of serialized records).
pub const DEFAULT_CACHE_SIZE_BYTES: u64 = 64 * 1024 * 1024;

/// Default HTTP bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Errors loading or parsing a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Upstream client configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct UpstreamConfig {
    /// Base URL of the employee directory API.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Attempt budget for the retry policy (including the first
    /// attempt).
    pub retry_max_attempts: u32,

    /// Initial backoff delay.
    pub retry_initial_delay: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_initial_delay: Duration::from_millis(
                crate::client::DEFAULT_INITIAL_DELAY_MS,
            ),
        }
    }
}

impl UpstreamConfig {
    /// Builds the retry policy this config describes.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::ExponentialBackoff {
            max_attempts: self.retry_max_attempts,
            initial_delay: self.retry_initial_delay,
            max_delay: Duration::from_secs(crate::client::DEFAULT_MAX_DELAY_SECS),
            multiplier: crate::client::DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

/// Memory cache configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheConfig {
    /// Maximum total size of cached values.
    pub max_size_bytes: u64,

    /// Optional time-to-live for cached entries. `None` keeps entries
    /// until evicted or invalidated.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_CACHE_SIZE_BYTES,
            ttl: None,
        }
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub cache: CacheConfig,
    /// HTTP bind address for the exposed API.
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from an INI file, filling any missing key
    /// with its default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path.as_ref())
            .map_err(|e| ConfigError::Read(e.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("upstream")) {
            if let Some(url) = section.get("base_url") {
                config.upstream.base_url = url.trim_end_matches('/').to_string();
            }
            if let Some(value) = section.get("timeout_secs") {
                config.upstream.timeout =
                    Duration::from_secs(parse_num("upstream.timeout_secs", value)?);
            }
            if let Some(value) = section.get("retry_max_attempts") {
                config.upstream.retry_max_attempts =
                    parse_num("upstream.retry_max_attempts", value)?;
            }
            if let Some(value) = section.get("retry_initial_delay_ms") {
                config.upstream.retry_initial_delay =
                    Duration::from_millis(parse_num("upstream.retry_initial_delay_ms", value)?);
            }
        }

        if let Some(section) = ini.section(Some("cache")) {
            if let Some(value) = section.get("max_size_bytes") {
                config.cache.max_size_bytes = parse_num("cache.max_size_bytes", value)?;
            }
            if let Some(value) = section.get("ttl_secs") {
                config.cache.ttl = Some(Duration::from_secs(parse_num("cache.ttl_secs", value)?));
            }
        }

        if let Some(section) = ini.section(Some("server")) {
            if let Some(bind) = section.get("bind") {
                config.bind = bind.to_string();
            }
        }

        Ok(config)
    }

    /// Set the upstream base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.upstream.base_url = base_url.into();
        self
    }

    /// Set the HTTP bind address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }
}

/// Parses an integer at the width its config field requires, so an
/// out-of-range value is rejected rather than truncated.
fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
