use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::{
    entities::submission::{FormInput, SubmissionPayload, SubmissionRecord},
    repositories::{sink::SubmissionSink, store::KeyValueStore},
    use_cases::{
        gate::{Decision, InvalidReason},
        submit::SubmissionHandler,
    },
};

const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

/// What the embedding application should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Pending,
    Success,
    Error(String),
}

/// Request context the embedding application captured at load time.
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    pub user_agent: String,
    pub referrer: String,
}

/// Drives one contact form: gates each attempt, delivers accepted ones
/// through the sink, and records confirmed successes. One submission is
/// processed at a time.
pub struct FormController<S, D>
where
    S: KeyValueStore,
    D: SubmissionSink,
{
    handler: SubmissionHandler<S>,
    sink: Option<D>,
    context: ClientContext,
    loaded_at: DateTime<Utc>,
    ts_marker: Mutex<DateTime<Utc>>,
    state: Mutex<UiState>,
}

impl<S, D> FormController<S, D>
where
    S: KeyValueStore,
    D: SubmissionSink,
{
    /// `loaded_at` is the instant the form was first rendered; the
    /// time-on-page check measures from it. `sink` is `None` when no
    /// endpoint is configured.
    pub fn new(
        handler: SubmissionHandler<S>,
        sink: Option<D>,
        context: ClientContext,
        loaded_at: DateTime<Utc>,
    ) -> Self {
        FormController {
            handler,
            sink,
            context,
            loaded_at,
            ts_marker: Mutex::new(loaded_at),
            state: Mutex::new(UiState::Idle),
        }
    }

    pub fn state(&self) -> UiState {
        self.state.lock().clone()
    }

    pub fn handler(&self) -> &SubmissionHandler<S> {
        &self.handler
    }

    /// Processes one submit attempt and returns the state to render.
    pub async fn submit(&self, input: FormInput) -> UiState {
        // Clear any banner from the previous attempt
        self.set_state(UiState::Idle);

        let now = Utc::now();
        let record = SubmissionRecord {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            message: input.message.trim().to_string(),
            honeypot: input.honeypot,
            elapsed_since_load_ms: (now - self.loaded_at).num_milliseconds(),
        };

        match self.handler.evaluate(&record, now.timestamp_millis()) {
            Decision::Allowed => {}
            Decision::Dropped => {
                tracing::debug!("spam trap triggered, discarding submission");
                return self.state();
            }
            Decision::RejectedInvalid(reason) => {
                return self.set_state(UiState::Error(self.invalid_message(&reason)));
            }
            Decision::RejectedRateLimited => {
                return self.set_state(UiState::Error(self.rate_limited_message()));
            }
        }

        let Some(sink) = self.sink.as_ref() else {
            tracing::error!("contact endpoint is not configured");
            return self.set_state(UiState::Error(GENERIC_FAILURE.to_string()));
        };

        self.set_state(UiState::Pending);

        let payload = SubmissionPayload {
            name: record.name.clone(),
            email: record.email.clone(),
            message: record.message.clone(),
            user_agent: self.context.user_agent.clone(),
            referrer: self.context.referrer.clone(),
            ts: self.ts_marker.lock().to_rfc3339(),
        };

        match sink.deliver(payload).await {
            Ok(()) => {
                self.handler.record_success(Utc::now().timestamp_millis());
                *self.ts_marker.lock() = Utc::now();
                tracing::info!(email = %record.email, "contact submission delivered");
                self.set_state(UiState::Success)
            }
            Err(e) => {
                tracing::error!(error = %e, "contact submission failed");
                self.set_state(UiState::Error(GENERIC_FAILURE.to_string()))
            }
        }
    }

    fn set_state(&self, next: UiState) -> UiState {
        *self.state.lock() = next.clone();
        next
    }

    fn invalid_message(&self, reason: &InvalidReason) -> String {
        match reason {
            InvalidReason::MissingFields => {
                "Please fill in your name, email, and message.".to_string()
            }
            InvalidReason::InvalidEmail => "Please enter a valid email address.".to_string(),
            InvalidReason::BadLength => {
                let chars = &self.handler.policy().message_chars;
                format!(
                    "Your message must be between {} and {} characters.",
                    chars.start(),
                    chars.end()
                )
            }
            InvalidReason::TooFast => {
                "That was quick! Please take a moment and try again.".to_string()
            }
        }
    }

    fn rate_limited_message(&self) -> String {
        let window = Duration::from_millis(self.handler.policy().window_ms.max(0) as u64);
        format!(
            "Too many messages sent. Please try again in {}.",
            humantime::format_duration(window)
        )
    }
}
