//! Client configuration loaded from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SPECFORGE_API_URL` | `http://localhost:5000/api` |
//! | `SPECFORGE_TOKEN` | unset |
//! | `SPECFORGE_TIMEOUT_SECS` | `30` |
//! | `SPECFORGE_HEALTH_POLL_SECS` | `30` |
//! | `SPECFORGE_RECENT_LIMIT` | `5` |
//! | `SPECFORGE_LOG_JSON` | `false` |

use crate::spec::domain::DEFAULT_RECENT_LIMIT;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the service base URL.
pub const API_URL_VAR: &str = "SPECFORGE_API_URL";
/// Environment variable holding the bearer token.
pub const TOKEN_VAR: &str = "SPECFORGE_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "SPECFORGE_TIMEOUT_SECS";
/// Environment variable holding the health poll interval in seconds.
pub const HEALTH_POLL_VAR: &str = "SPECFORGE_HEALTH_POLL_SECS";
/// Environment variable holding the recent-cache size.
pub const RECENT_LIMIT_VAR: &str = "SPECFORGE_RECENT_LIMIT";
/// Environment variable switching log output to JSON.
pub const LOG_JSON_VAR: &str = "SPECFORGE_LOG_JSON";

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HEALTH_POLL_SECS: u64 = 30;

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// What was expected instead.
        reason: &'static str,
    },
}

/// Runtime settings for the specification client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecForgeConfig {
    /// Base URL of the remote service API.
    pub api_base_url: String,
    /// Bearer token attached to gateway calls.
    pub auth_token: Option<String>,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Interval between health polls.
    pub health_poll_interval: Duration,
    /// Number of specifications kept in the recent cache.
    pub recent_limit: usize,
    /// Whether logs are emitted as JSON lines.
    pub log_json: bool,
}

impl Default for SpecForgeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            auth_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            health_poll_interval: Duration::from_secs(DEFAULT_HEALTH_POLL_SECS),
            recent_limit: DEFAULT_RECENT_LIMIT,
            log_json: false,
        }
    }
}

impl SpecForgeConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// malformed value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let recent_limit = match read(RECENT_LIMIT_VAR) {
            Some(value) => match value.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(invalid(RECENT_LIMIT_VAR, value, "expected a positive integer")),
            },
            None => defaults.recent_limit,
        };

        Ok(Self {
            api_base_url: read(API_URL_VAR).unwrap_or(defaults.api_base_url),
            auth_token: read(TOKEN_VAR),
            request_timeout: read_seconds(read(TIMEOUT_VAR), TIMEOUT_VAR, defaults.request_timeout)?,
            health_poll_interval: read_seconds(
                read(HEALTH_POLL_VAR),
                HEALTH_POLL_VAR,
                defaults.health_poll_interval,
            )?,
            recent_limit,
            log_json: read_bool(read(LOG_JSON_VAR), LOG_JSON_VAR, defaults.log_json)?,
        })
    }
}

fn invalid(name: &'static str, value: String, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value,
        reason,
    }
}

fn read_seconds(
    value: Option<String>,
    name: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(invalid(name, value, "expected a positive number of seconds")),
    }
}

fn read_bool(value: Option<String>, name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(invalid(name, value, "expected true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RECENT_LIMIT_VAR, SpecForgeConfig, TIMEOUT_VAR};
    use rstest::rstest;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        move |name: &str| values.get(name).cloned()
    }

    #[rstest]
    fn unset_variables_yield_defaults() {
        let config = SpecForgeConfig::from_lookup(lookup(&[])).expect("defaults should load");
        assert_eq!(config, SpecForgeConfig::default());
    }

    #[rstest]
    fn set_variables_override_defaults() {
        let config = SpecForgeConfig::from_lookup(lookup(&[
            ("SPECFORGE_API_URL", "https://specs.example.com/api"),
            ("SPECFORGE_TOKEN", "secret"),
            ("SPECFORGE_TIMEOUT_SECS", "5"),
            ("SPECFORGE_HEALTH_POLL_SECS", "10"),
            ("SPECFORGE_RECENT_LIMIT", "8"),
            ("SPECFORGE_LOG_JSON", "yes"),
        ]))
        .expect("valid configuration should load");

        assert_eq!(config.api_base_url, "https://specs.example.com/api");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.health_poll_interval, Duration::from_secs(10));
        assert_eq!(config.recent_limit, 8);
        assert!(config.log_json);
    }

    #[rstest]
    fn blank_token_is_treated_as_unset() {
        let config = SpecForgeConfig::from_lookup(lookup(&[("SPECFORGE_TOKEN", "   ")]))
            .expect("blank values should fall back");
        assert_eq!(config.auth_token, None);
    }

    #[rstest]
    #[case(RECENT_LIMIT_VAR, "0")]
    #[case(RECENT_LIMIT_VAR, "many")]
    #[case(TIMEOUT_VAR, "-3")]
    #[case("SPECFORGE_LOG_JSON", "sometimes")]
    fn malformed_values_are_rejected(#[case] name: &'static str, #[case] value: &str) {
        let result = SpecForgeConfig::from_lookup(lookup(&[(name, value)]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: rejected, .. }) if rejected == name
        ));
    }
}
