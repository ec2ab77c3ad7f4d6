use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::{env, fmt, str::FromStr};
use url::Url;

use crate::constants;
use crate::use_cases::gate::GatePolicy;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// The endpoint answers with a JSON body; success requires `{"ok": true}`.
    JsonAck,
    /// The response is opaque; a completed request counts as success.
    Opaque,
}

impl FromStr for ResponseMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json_ack" => Ok(ResponseMode::JsonAck),
            "opaque" => Ok(ResponseMode::Opaque),
            _ => Err(ConfigError::Message(format!("Invalid response mode: {}", s))),
        }
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponseMode::JsonAck => "json_ack",
            ResponseMode::Opaque => "opaque",
        };
        write!(f, "{s}")
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub endpoint_url: Option<Url>,

    #[serde(default = "default_response_mode")]
    pub response_mode: ResponseMode,

    #[serde(default = "default_window_ms")]
    pub rate_limit_window_ms: i64,

    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max: usize,

    #[serde(default = "default_min_elapsed_ms")]
    pub min_elapsed_ms: i64,

    #[serde(default = "default_message_min_chars")]
    pub message_min_chars: usize,

    #[serde(default = "default_message_max_chars")]
    pub message_max_chars: usize,

    #[serde(default = "default_ledger_key")]
    pub ledger_key: String,

    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_name() -> String {
    "Contact-Gate".to_string()
}
fn default_response_mode() -> ResponseMode {
    ResponseMode::JsonAck
}
fn default_window_ms() -> i64 {
    constants::RATE_LIMIT_WINDOW_MS
}
fn default_rate_limit_max() -> usize {
    constants::RATE_LIMIT_MAX
}
fn default_min_elapsed_ms() -> i64 {
    constants::MIN_ELAPSED_MS
}
fn default_message_min_chars() -> usize {
    constants::MESSAGE_MIN_CHARS
}
fn default_message_max_chars() -> usize {
    constants::MESSAGE_MAX_CHARS
}
fn default_ledger_key() -> String {
    constants::LEDGER_KEY.to_string()
}
fn default_ledger_path() -> String {
    "contact_ledger.json".to_string()
}
fn default_request_timeout() -> u64 {
    10
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("CONTACT")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        // Inject the endpoint from the environment if the file left it unset
        if config.endpoint_url.is_none() {
            config.endpoint_url = match env::var("CONTACT_ENDPOINT_URL") {
                Ok(raw) => Some(Url::parse(&raw).map_err(|e| {
                    ConfigError::Message(format!("Invalid CONTACT_ENDPOINT_URL: {}", e))
                })?),
                Err(_) => None,
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.rate_limit_window_ms <= 0 {
            errors.push("rate_limit_window_ms must be positive");
        }
        if self.rate_limit_max == 0 {
            errors.push("rate_limit_max must allow at least one submission");
        }
        if self.min_elapsed_ms < 0 {
            errors.push("min_elapsed_ms cannot be negative");
        }
        if self.message_min_chars > self.message_max_chars {
            errors.push("message_min_chars cannot exceed message_max_chars");
        }
        if self.ledger_key.trim().is_empty() {
            errors.push("ledger_key cannot be empty");
        }
        if self.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be positive");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    /// The configured endpoint, or `None` when missing or still the
    /// copy-paste placeholder from the deployment docs.
    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint_url
            .as_ref()
            .filter(|url| !url.as_str().contains("PASTE_YOUR"))
    }

    pub fn gate_policy(&self) -> GatePolicy {
        GatePolicy {
            window_ms: self.rate_limit_window_ms,
            max_attempts: self.rate_limit_max,
            min_elapsed_ms: self.min_elapsed_ms,
            message_chars: self.message_min_chars..=self.message_max_chars,
        }
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for Option<Url> {
    fn redact(&self) -> &str {
        match self {
            None => "[MISSING]",
            Some(_) => "[REDACTED]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("name", &self.name)
            .field("endpoint_url", &self.endpoint_url.redact())
            .field("response_mode", &self.response_mode)
            .field("rate_limit_window_ms", &self.rate_limit_window_ms)
            .field("rate_limit_max", &self.rate_limit_max)
            .field("min_elapsed_ms", &self.min_elapsed_ms)
            .field("message_min_chars", &self.message_min_chars)
            .field("message_max_chars", &self.message_max_chars)
            .field("ledger_key", &self.ledger_key)
            .field("ledger_path", &self.ledger_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
