use anyhow::{Context, Result};

use crate::cache::DEFAULT_TTL;
use crate::providers::ycombinator::DEFAULT_COOLDOWN;
use crate::providers::DEFAULT_PROVIDER_TIMEOUT;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// RapidAPI key for the Y Combinator jobs feed.
    pub rapidapi_key: String,
    /// Upper bound on a single provider round trip.
    pub provider_timeout_ms: u64,
    /// Lifetime of the primary search result cache.
    pub cache_ttl_secs: u64,
    /// Cooldown window applied after a rate-limit response.
    pub cooldown_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rapidapi_key: require_env("RAPIDAPI_KEY")?,
            provider_timeout_ms: env_or(
                "PROVIDER_TIMEOUT_MS",
                DEFAULT_PROVIDER_TIMEOUT.as_millis() as u64,
            )?,
            cache_ttl_secs: env_or("CACHE_TTL_SECS", DEFAULT_TTL.as_secs())?,
            cooldown_secs: env_or("PROVIDER_COOLDOWN_SECS", DEFAULT_COOLDOWN.as_secs())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("'{key}' must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}
