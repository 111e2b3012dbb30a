// Port for fetching chart payloads from the performance backend
use crate::domain::failure::ChartFailure;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait PerformanceSource: Send + Sync {
    /// Issue one GET for `endpoint` (a path such as `/performance_data`).
    /// Non-2xx replies come back as [`ChartFailure::HttpStatus`].
    async fn fetch(&self, endpoint: &str) -> Result<Value, ChartFailure>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Canned replies keyed by endpoint, recording every call
    #[derive(Default)]
    pub struct StaticSource {
        replies: HashMap<String, Result<Value, ChartFailure>>,
        delay: Option<Duration>,
        calls: Mutex<Vec<String>>,
    }

    impl StaticSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(mut self, endpoint: &str, payload: Value) -> Self {
            self.replies.insert(endpoint.to_string(), Ok(payload));
            self
        }

        pub fn fail(mut self, endpoint: &str, failure: ChartFailure) -> Self {
            self.replies.insert(endpoint.to_string(), Err(failure));
            self
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PerformanceSource for StaticSource {
        async fn fetch(&self, endpoint: &str) -> Result<Value, ChartFailure> {
            self.calls.lock().unwrap().push(endpoint.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.replies
                .get(endpoint)
                .cloned()
                .unwrap_or_else(|| Err(ChartFailure::http_status(404)))
        }
    }
}
