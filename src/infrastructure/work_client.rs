// HTTP adapter for work submissions
use crate::application::work_publisher::WorkPublisher;
use crate::domain::work::{WorkReply, WorkSubmission};
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

pub const SUBMIT_WORK_PATH: &str = "/submit-work";

#[derive(Debug, Clone)]
pub struct HttpWorkPublisher {
    url: String,
    client: reqwest::Client,
}

impl HttpWorkPublisher {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: format!("{}{}", base_url.trim_end_matches('/'), SUBMIT_WORK_PATH),
            client,
        })
    }
}

#[async_trait]
impl WorkPublisher for HttpWorkPublisher {
    async fn publish(&self, submission: &WorkSubmission) -> anyhow::Result<WorkReply> {
        let response = self
            .client
            .post(&self.url)
            .json(submission)
            .send()
            .await
            .context("Failed to send work submission")?;

        tracing::debug!("Work submission answered with {}", response.status());

        response
            .json::<WorkReply>()
            .await
            .context("Failed to parse work submission reply")
    }
}
