//! Engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::cache::CacheConfig;

/// Environment variable toggling the read cache
pub const ENV_CACHE_ENABLED: &str = "CACHE_ENABLED";

/// Environment variable holding the default cache TTL in seconds
pub const ENV_CACHE_TTL_SECONDS: &str = "CACHE_TTL_SECONDS";

/// Interview engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Read cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Page size used when a list request does not give one
    #[serde(default = "default_page_limit")]
    pub default_page_limit: u32,

    /// Largest page size a caller may request
    #[serde(default = "max_page_limit")]
    pub max_page_limit: u32,
}

fn default_page_limit() -> u32 {
    20
}

fn max_page_limit() -> u32 {
    50
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            default_page_limit: default_page_limit(),
            max_page_limit: max_page_limit(),
        }
    }
}

impl EngineConfig {
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_page_limits(mut self, default_limit: u32, max_limit: u32) -> Self {
        self.default_page_limit = default_limit;
        self.max_page_limit = max_limit;
        self
    }

    /// Build a configuration from `CACHE_ENABLED` and `CACHE_TTL_SECONDS`
    ///
    /// Missing variables keep their defaults; unparseable ones are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`EngineConfig::from_env`] over an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_CACHE_ENABLED) {
            match parse_bool(&raw) {
                Some(enabled) => config.cache.enabled = enabled,
                None => warn!("{}={:?} is not a boolean, keeping default", ENV_CACHE_ENABLED, raw),
            }
        }

        if let Some(raw) = lookup(ENV_CACHE_TTL_SECONDS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.cache.default_ttl = Duration::from_secs(secs),
                Err(e) => warn!("{}={:?} is invalid ({}), keeping default", ENV_CACHE_TTL_SECONDS, raw, e),
            }
        }

        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
