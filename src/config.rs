//! Service configuration.
//!
//! Every environment variable is read here; the rest of the crate receives typed values.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::matches::CleanupConfig;

/// Upper bound for any duration setting, one hundred years
const MAX_DURATION_SECS: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: String,
        value: String,
        reason: String,
    },
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP gateway listens on
    pub bind: SocketAddr,
    /// Expiry sweep settings
    pub cleanup: CleanupConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment, reading a `.env` file first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CleanupConfig::default();

        let bind = parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 10000)))?;

        let cleanup_interval = secs_or(&lookup, "CLEANUP_INTERVAL_SECS", defaults.cleanup_interval)?;
        if cleanup_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "CLEANUP_INTERVAL_SECS".to_string(),
                value: "0".to_string(),
                reason: "interval must be positive".to_string(),
            });
        }

        let cleanup = CleanupConfig {
            cleanup_interval,
            match_ttl: secs_or(&lookup, "MATCH_TTL_SECS", defaults.match_ttl)?,
            resolved_retention: secs_or(
                &lookup,
                "RESOLVED_RETENTION_SECS",
                defaults.resolved_retention,
            )?,
        };

        Ok(Self { bind, cleanup })
    }
}

fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: var.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        }),
    }
}

fn secs_or<F>(lookup: &F, var: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = parse_or(lookup, var, default.as_secs())?;
    if secs > MAX_DURATION_SECS {
        return Err(ConfigError::Invalid {
            var: var.to_string(),
            value: secs.to_string(),
            reason: format!("must be at most {} seconds", MAX_DURATION_SECS),
        });
    }
    Ok(Duration::from_secs(secs))
}
