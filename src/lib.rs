use std::time::Duration;

use chrono::Utc;

mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{store, utils, webhook};
pub use interfaces::{controller, repositories};

use controller::{ClientContext, FormController};
use errors::AppError;
use store::json_file::JsonFileStore;
use use_cases::{gate::SubmissionGate, submit::SubmissionHandler};
use webhook::client::WebhookClient;

pub struct AppState {
    pub contact_form: AppFormController,
}

pub type AppFormController = FormController<JsonFileStore, WebhookClient>;

impl AppState {
    pub fn new(
        config: &settings::AppConfig,
        context: ClientContext,
    ) -> Result<Self, AppError> {
        let store = JsonFileStore::open(&config.ledger_path);
        let gate = SubmissionGate::new(config.gate_policy());
        let handler = SubmissionHandler::new(gate, store, config.ledger_key.clone());

        let sink = match config.endpoint() {
            Some(url) => Some(WebhookClient::new(
                url.clone(),
                config.response_mode,
                Duration::from_secs(config.request_timeout_secs),
            )?),
            None => {
                tracing::warn!("contact endpoint is not configured, submissions will fail");
                None
            }
        };

        Ok(AppState {
            contact_form: FormController::new(handler, sink, context, Utc::now()),
        })
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt::init();
}
