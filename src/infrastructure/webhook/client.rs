use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::{
    entities::submission::SubmissionPayload, errors::AppError,
    repositories::sink::SubmissionSink, settings::ResponseMode,
};

#[derive(Debug, Deserialize)]
struct WebhookAck {
    #[serde(default)]
    ok: bool,
}

/// Posts accepted submissions to the configured endpoint.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
    endpoint: Url,
    mode: ResponseMode,
}

impl WebhookClient {
    pub fn new(endpoint: Url, mode: ResponseMode, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(WebhookClient {
            http,
            endpoint,
            mode,
        })
    }
}

#[async_trait]
impl SubmissionSink for WebhookClient {
    async fn deliver(&self, payload: SubmissionPayload) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await?;

        match self.mode {
            // Cross-origin targets give us nothing readable; reaching the
            // endpoint at all counts as delivery.
            ResponseMode::Opaque => Ok(()),
            ResponseMode::JsonAck => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                let ack = serde_json::from_str::<WebhookAck>(&body).ok();

                if status.is_success() && ack.is_some_and(|a| a.ok) {
                    Ok(())
                } else {
                    Err(AppError::ServerRejected {
                        status: status.as_u16(),
                        body,
                    })
                }
            }
        }
    }
}
