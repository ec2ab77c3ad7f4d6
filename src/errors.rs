use derive_more::Display;

#[derive(Debug, Display)]
pub enum AppError {
    #[display("Contact endpoint is not configured")]
    EndpointNotConfigured,

    #[display("Network error: {_0}")]
    Network(String),

    #[display("Webhook rejected submission (status {status}): {body}")]
    ServerRejected { status: u16, body: String },

    #[display("Storage error: {_0}")]
    Storage(String),

    #[display("Configuration error: {_0}")]
    Config(String),

    #[display("Internal error: {_0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl std::error::Error for AppError {}
