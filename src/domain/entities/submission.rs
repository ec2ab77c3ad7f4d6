use serde::{Deserialize, Serialize};

/// Raw form fields as the embedding application collected them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub message: String,

    #[serde(default)]
    pub honeypot: String,
}

/// One submit attempt, ready for gating. Built per attempt and discarded
/// once a decision is made.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    pub message: String,
    pub honeypot: String,
    pub elapsed_since_load_ms: i64,
}

/// The JSON body delivered to the webhook endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub user_agent: String,
    pub referrer: String,
    pub ts: String,
}
