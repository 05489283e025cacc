//! Runtime configuration
//!
//! Values come from the process environment (after `.env` is loaded by the
//! binaries through `dotenvy`). Every setting has a default so both binaries
//! start against a local stack with no configuration at all.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_ZORA_BASE_URL: &str = "https://api-sdk.zora.engineering";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PROFILE_CACHE_TTL_SECS: u64 = 30;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the profiles API polled by the dashboard
    pub api_base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub bind_addr: String,
    pub zora_api_key: String,
    pub zora_base_url: String,
    pub profile_cache_ttl: Duration,
    pub cors_origins: Vec<String>,
    pub dashboard_view: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            zora_api_key: String::new(),
            zora_base_url: DEFAULT_ZORA_BASE_URL.to_string(),
            profile_cache_ttl: Duration::from_secs(DEFAULT_PROFILE_CACHE_TTL_SECS),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            dashboard_view: "table".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let api_base_url = get("API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let poll_interval = match get("POLL_INTERVAL_SECS") {
            Some(raw) => Duration::from_secs(parse_secs("POLL_INTERVAL_SECS", &raw)?),
            None => defaults.poll_interval,
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_secs("REQUEST_TIMEOUT_SECS", &raw)?),
            None => defaults.request_timeout,
        };

        let profile_cache_ttl = match get("PROFILE_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(parse_secs("PROFILE_CACHE_TTL_SECS", &raw)?),
            None => defaults.profile_cache_ttl,
        };

        let cors_origins = match get("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            api_base_url,
            poll_interval,
            request_timeout,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            zora_api_key: get("ZORA_API_KEY").unwrap_or_default(),
            zora_base_url: get("ZORA_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.zora_base_url),
            profile_cache_ttl,
            cors_origins,
            dashboard_view: get("DASHBOARD_VIEW").unwrap_or(defaults.dashboard_view),
        })
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(format!("{} must be greater than zero", key)),
        Ok(secs) => Ok(secs),
        Err(_) => Err(format!("Invalid {}: '{}'. Expected a number of seconds", key, raw)),
    }
}
