// Work service - Use case for posting work and producing the user alert
use crate::application::work_publisher::WorkPublisher;
use crate::domain::work::{SUBMISSION_FAILED_ALERT, WorkReply, WorkSubmission};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkOutcome {
    pub status: String,
    pub message: String,
    pub alert: String,
}

impl From<WorkReply> for WorkOutcome {
    fn from(reply: WorkReply) -> Self {
        let alert = reply.alert();
        Self {
            status: reply.status,
            message: reply.message,
            alert,
        }
    }
}

#[derive(Clone)]
pub struct WorkService {
    publisher: Arc<dyn WorkPublisher>,
}

impl WorkService {
    pub fn new(publisher: Arc<dyn WorkPublisher>) -> Self {
        Self { publisher }
    }

    pub async fn submit(&self, submission: &WorkSubmission) -> WorkOutcome {
        match self.publisher.publish(submission).await {
            Ok(reply) => {
                tracing::info!(
                    status = %reply.status,
                    title = %submission.title,
                    "Work submission answered"
                );
                reply.into()
            }
            Err(e) => {
                tracing::error!("Error posting work submission: {:#}", e);
                WorkOutcome {
                    status: "error".to_string(),
                    message: e.to_string(),
                    alert: SUBMISSION_FAILED_ALERT.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Replying(Option<WorkReply>);

    #[async_trait]
    impl WorkPublisher for Replying {
        async fn publish(&self, _submission: &WorkSubmission) -> anyhow::Result<WorkReply> {
            self.0
                .clone()
                .ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    fn submission() -> WorkSubmission {
        WorkSubmission {
            title: "Shipped reports".to_string(),
            description: "Quarterly reporting pipeline".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_reply() {
        let service = WorkService::new(Arc::new(Replying(Some(WorkReply {
            status: "success".to_string(),
            message: "Work posted to LinkedIn successfully!".to_string(),
        }))));

        let outcome = service.submit(&submission()).await;
        assert_eq!(outcome.status, "success");
        assert_eq!(outcome.alert, "✅ Work posted to LinkedIn successfully!");
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let service = WorkService::new(Arc::new(Replying(None)));
        let outcome = service.submit(&submission()).await;
        assert_eq!(outcome.status, "error");
        assert_eq!(outcome.alert, SUBMISSION_FAILED_ALERT);
    }
}
