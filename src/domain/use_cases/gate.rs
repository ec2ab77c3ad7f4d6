use std::fmt;
use std::ops::RangeInclusive;

use crate::constants;
use crate::entities::ledger::SubmissionLedger;
use crate::entities::submission::SubmissionRecord;
use crate::utils::valid_email::valid_email;

/// Tunables for the submission gate.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    pub window_ms: i64,
    pub max_attempts: usize,
    pub min_elapsed_ms: i64,
    pub message_chars: RangeInclusive<usize>,
}

impl Default for GatePolicy {
    fn default() -> Self {
        GatePolicy {
            window_ms: constants::RATE_LIMIT_WINDOW_MS,
            max_attempts: constants::RATE_LIMIT_MAX,
            min_elapsed_ms: constants::MIN_ELAPSED_MS,
            message_chars: constants::MESSAGE_MIN_CHARS..=constants::MESSAGE_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    MissingFields,
    InvalidEmail,
    BadLength,
    TooFast,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvalidReason::MissingFields => "missing fields",
            InvalidReason::InvalidEmail => "invalid email",
            InvalidReason::BadLength => "bad length",
            InvalidReason::TooFast => "too fast",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    RejectedInvalid(InvalidReason),
    RejectedRateLimited,
    /// Spam trap triggered. The caller must discard the attempt without
    /// any user-visible feedback.
    Dropped,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    policy: GatePolicy,
}

impl SubmissionGate {
    pub fn new(policy: GatePolicy) -> Self {
        SubmissionGate { policy }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Runs the ordered checks over one attempt. The first failing check
    /// wins. The ledger is pruned in place once the rate-limit stage is
    /// reached, whether or not the attempt is allowed.
    pub fn evaluate(
        &self,
        record: &SubmissionRecord,
        ledger: &mut SubmissionLedger,
        now_ms: i64,
    ) -> Decision {
        let name = record.name.trim();
        let email = record.email.trim();
        let message = record.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Decision::RejectedInvalid(InvalidReason::MissingFields);
        }

        if !valid_email(email) {
            return Decision::RejectedInvalid(InvalidReason::InvalidEmail);
        }

        if !self.policy.message_chars.contains(&message.chars().count()) {
            return Decision::RejectedInvalid(InvalidReason::BadLength);
        }

        if !record.honeypot.trim().is_empty() {
            return Decision::Dropped;
        }

        if record.elapsed_since_load_ms < self.policy.min_elapsed_ms {
            return Decision::RejectedInvalid(InvalidReason::TooFast);
        }

        ledger.prune(now_ms, self.policy.window_ms);
        if ledger.len() >= self.policy.max_attempts {
            return Decision::RejectedRateLimited;
        }

        Decision::Allowed
    }

    /// Appends a confirmed submission, clearing expired entries first.
    /// Call only after the downstream delivery succeeded.
    pub fn record_success(&self, ledger: &mut SubmissionLedger, now_ms: i64) {
        ledger.prune(now_ms, self.policy.window_ms);
        ledger.record(now_ms);
    }
}
