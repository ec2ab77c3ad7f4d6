use crate::{
    entities::{ledger::SubmissionLedger, submission::SubmissionRecord},
    repositories::store::KeyValueStore,
    use_cases::gate::{Decision, GatePolicy, SubmissionGate},
};

/// Runs the gate against the ledger persisted in an injected store.
pub struct SubmissionHandler<S>
where
    S: KeyValueStore,
{
    gate: SubmissionGate,
    store: S,
    ledger_key: String,
}

impl<S> SubmissionHandler<S>
where
    S: KeyValueStore,
{
    pub fn new(gate: SubmissionGate, store: S, ledger_key: impl Into<String>) -> Self {
        SubmissionHandler {
            gate,
            store,
            ledger_key: ledger_key.into(),
        }
    }

    pub fn policy(&self) -> &GatePolicy {
        self.gate.policy()
    }

    /// Gates one attempt. The pruned ledger is written back whenever the
    /// rate-limit stage was reached; earlier rejections and honeypot drops
    /// leave the store untouched. A rejection itself is never recorded, so
    /// probing the limit cannot extend a lockout.
    pub fn evaluate(&self, record: &SubmissionRecord, now_ms: i64) -> Decision {
        let mut ledger = self.load_ledger();
        let decision = self.gate.evaluate(record, &mut ledger, now_ms);

        if matches!(decision, Decision::Allowed | Decision::RejectedRateLimited) {
            self.persist(&ledger);
        }

        decision
    }

    /// Records a confirmed delivery into the ledger.
    pub fn record_success(&self, now_ms: i64) {
        let mut ledger = self.load_ledger();
        self.gate.record_success(&mut ledger, now_ms);
        self.persist(&ledger);
    }

    pub fn ledger(&self) -> SubmissionLedger {
        self.load_ledger()
    }

    fn load_ledger(&self) -> SubmissionLedger {
        SubmissionLedger::parse(self.store.get(&self.ledger_key).as_deref())
    }

    fn persist(&self, ledger: &SubmissionLedger) {
        // The ledger is a soft heuristic; a failed write must not block the
        // submission itself.
        if let Err(e) = self.store.set(&self.ledger_key, &ledger.to_json()) {
            tracing::warn!(error = %e, "failed to persist submission ledger");
        }
    }
}
