
use std::str::FromStr;

use test_utils::*;

use contact_gate::settings::ResponseMode;
use url::Url;

#[test]
fn a_sensible_config_validates() {
    assert!(test_config().validate().is_ok());
}

#[test]
fn zero_window_is_rejected() {
    let mut config = test_config();
    config.rate_limit_window_ms = 0;
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("rate_limit_window_ms"), "got: {err}");
}

#[test]
fn zero_attempt_budget_is_rejected() {
    let mut config = test_config();
    config.rate_limit_max = 0;
    assert!(config.validate().is_err());
}

#[test]
fn inverted_message_range_is_rejected() {
    let mut config = test_config();
    config.message_min_chars = 3_000;
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("message_min_chars"), "got: {err}");
}

#[test]
fn violations_are_collected_into_one_error() {
    let mut config = test_config();
    config.rate_limit_window_ms = -5;
    config.request_timeout_secs = 0;
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("rate_limit_window_ms"), "got: {err}");
    assert!(err.contains("request_timeout_secs"), "got: {err}");
}

#[test]
fn placeholder_endpoint_counts_as_unconfigured() {
    let mut config = test_config();
    config.endpoint_url = Some(
        Url::parse("https://script.google.com/PASTE_YOUR_APPS_SCRIPT_WEB_APP_URL_HERE").unwrap(),
    );
    assert!(config.endpoint().is_none());

    config.endpoint_url = None;
    assert!(config.endpoint().is_none());

    config.endpoint_url = Some(Url::parse("https://hooks.example.test/exec").unwrap());
    assert!(config.endpoint().is_some());
}

#[test]
fn gate_policy_mirrors_the_config() {
    let config = test_config();
    let policy = config.gate_policy();

    assert_eq!(policy.window_ms, config.rate_limit_window_ms);
    assert_eq!(policy.max_attempts, config.rate_limit_max);
    assert_eq!(policy.min_elapsed_ms, config.min_elapsed_ms);
    assert_eq!(
        policy.message_chars,
        config.message_min_chars..=config.message_max_chars
    );
}

#[test]
fn response_mode_parses_case_insensitively() {
    assert_eq!(ResponseMode::from_str("opaque").unwrap(), ResponseMode::Opaque);
    assert_eq!(
        ResponseMode::from_str("JSON_ACK").unwrap(),
        ResponseMode::JsonAck
    );
    assert!(ResponseMode::from_str("fire-and-forget").is_err());
}

#[test]
fn debug_output_redacts_the_endpoint() {
    let config = test_config();
    let rendered = format!("{config:?}");
    assert!(rendered.contains("[REDACTED]"));
    assert!(!rendered.contains("hooks.example.test"));

    let mut config = config;
    config.endpoint_url = None;
    assert!(format!("{config:?}").contains("[MISSING]"));
}
