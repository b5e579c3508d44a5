//! Integration tests for reading client configuration from the process
//! environment.

mod test_helpers;

use rstest::rstest;
use specforge::config::{
    API_URL_VAR, ConfigError, HEALTH_POLL_VAR, LOG_JSON_VAR, RECENT_LIMIT_VAR, SpecForgeConfig,
    TIMEOUT_VAR, TOKEN_VAR,
};
use std::time::Duration;
use test_helpers::EnvVarGuard;

const ALL_VARS: [&str; 6] = [
    API_URL_VAR,
    TOKEN_VAR,
    TIMEOUT_VAR,
    HEALTH_POLL_VAR,
    RECENT_LIMIT_VAR,
    LOG_JSON_VAR,
];

fn cleared_except(overrides: &[(&'static str, Option<&'static str>)]) -> EnvVarGuard {
    let changes: Vec<(&str, Option<&str>)> = ALL_VARS
        .iter()
        .map(|name| {
            let value = overrides
                .iter()
                .find(|(candidate, _)| candidate == name)
                .and_then(|(_, value)| *value);
            (*name, value)
        })
        .collect();
    EnvVarGuard::set_many(&changes)
}

#[rstest]
fn unset_environment_yields_defaults() {
    let _guard = cleared_except(&[]);

    assert_eq!(SpecForgeConfig::from_env(), Ok(SpecForgeConfig::default()));
}

#[rstest]
fn environment_overrides_every_setting() {
    let _guard = cleared_except(&[
        (API_URL_VAR, Some("https://specs.example.com/api")),
        (TOKEN_VAR, Some("secret")),
        (TIMEOUT_VAR, Some("5")),
        (HEALTH_POLL_VAR, Some("60")),
        (RECENT_LIMIT_VAR, Some("10")),
        (LOG_JSON_VAR, Some("true")),
    ]);

    let config = SpecForgeConfig::from_env();

    assert_eq!(
        config,
        Ok(SpecForgeConfig {
            api_base_url: "https://specs.example.com/api".to_owned(),
            auth_token: Some("secret".to_owned()),
            request_timeout: Duration::from_secs(5),
            health_poll_interval: Duration::from_secs(60),
            recent_limit: 10,
            log_json: true,
        })
    );
}

#[rstest]
fn malformed_timeout_names_the_variable() {
    let _guard = cleared_except(&[(TIMEOUT_VAR, Some("soon"))]);

    let result = SpecForgeConfig::from_env();

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { name, .. }) if name == TIMEOUT_VAR
    ));
}
