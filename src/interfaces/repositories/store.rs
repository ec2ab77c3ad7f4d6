use mockall::automock;

use crate::errors::AppError;

/// The persistent surface the submission ledger lives behind. Reads are
/// infallible; implementations swallow and log their own read errors so a
/// corrupt store degrades to an empty ledger instead of breaking the form.
#[automock]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}
