// Port for relaying work submissions to the backend
use crate::domain::work::{WorkReply, WorkSubmission};
use async_trait::async_trait;

#[async_trait]
pub trait WorkPublisher: Send + Sync {
    /// POST the submission. The reply body is decoded whatever the status
    /// code, since the backend reports failures in the same shape.
    async fn publish(&self, submission: &WorkSubmission) -> anyhow::Result<WorkReply>;
}
