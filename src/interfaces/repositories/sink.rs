use async_trait::async_trait;
use mockall::automock;

use crate::{entities::submission::SubmissionPayload, errors::AppError};

/// Downstream delivery target for accepted submissions.
#[automock]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(&self, payload: SubmissionPayload) -> Result<(), AppError>;
}
