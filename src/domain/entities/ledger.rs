use serde::{Deserialize, Serialize};

/// Timestamps (epoch milliseconds) of confirmed submissions, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionLedger(Vec<i64>);

impl SubmissionLedger {
    pub fn new(timestamps: Vec<i64>) -> Self {
        SubmissionLedger(timestamps)
    }

    /// Parses the persisted form. Malformed or missing data yields an empty
    /// ledger rather than an error.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| serde_json::from_str::<Vec<i64>>(s).ok())
            .map(SubmissionLedger)
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    /// Drops every entry that is `window_ms` or more old at `now_ms`.
    pub fn prune(&mut self, now_ms: i64, window_ms: i64) {
        self.0.retain(|ts| now_ms - ts < window_ms);
    }

    pub fn record(&mut self, now_ms: i64) {
        self.0.push(now_ms);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.0
    }
}
