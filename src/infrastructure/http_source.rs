// HTTP adapter for the performance backend
use crate::application::performance_source::PerformanceSource;
use crate::domain::failure::ChartFailure;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpPerformanceSource {
    base_url: String,
    client: reqwest::Client,
}

/// Shape of the backend's error bodies, e.g. `{"error": "Employee not found"}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpPerformanceSource {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

/// Prefer the server's own message, fall back to the status code
fn status_failure(status: u16, body: &str) -> ChartFailure {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.is_empty() => ChartFailure::HttpStatus { status, message },
        _ => ChartFailure::http_status(status),
    }
}

#[async_trait]
impl PerformanceSource for HttpPerformanceSource {
    async fn fetch(&self, endpoint: &str) -> Result<Value, ChartFailure> {
        let url = self.url(endpoint);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request to {} failed: {}", url, e);
                if e.is_timeout() {
                    ChartFailure::Network("Request timed out".to_string())
                } else {
                    ChartFailure::Network("Failed to fetch chart data".to_string())
                }
            })?;

        let status = response.status();
        tracing::debug!("Response status for {}: {}", url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_failure(status.as_u16(), &body));
        }

        response.json::<Value>().await.map_err(|e| {
            tracing::error!("Failed to parse response from {}: {}", url, e);
            ChartFailure::SchemaInvalid("response is not valid JSON".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/performance_data",
                get(|| async { Json(json!({"labels": ["W1", "W2"], "current_week": [80, 90]})) }),
            )
            .route(
                "/employee_performance_data/42",
                get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))) }),
            )
            .route(
                "/personal_performance_data",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>") }),
            )
            .route("/broken", get(|| async { "{not json" }))
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let base = serve(backend()).await;
        let source = HttpPerformanceSource::new(base, Duration::from_secs(5)).unwrap();

        let payload = source.fetch("/performance_data").await.unwrap();
        assert_eq!(payload["current_week"], json!([80, 90]));
    }

    #[tokio::test]
    async fn test_error_body_message_is_used() {
        let base = serve(backend()).await;
        let source = HttpPerformanceSource::new(base, Duration::from_secs(5)).unwrap();

        let err = source.fetch("/employee_performance_data/42").await.unwrap_err();
        assert_eq!(
            err,
            ChartFailure::HttpStatus {
                status: 404,
                message: "not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unparsable_error_body_falls_back_to_status() {
        let base = serve(backend()).await;
        let source = HttpPerformanceSource::new(base, Duration::from_secs(5)).unwrap();

        let err = source.fetch("/personal_performance_data").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[tokio::test]
    async fn test_invalid_json_and_unreachable_backend() {
        let base = serve(backend()).await;
        let source = HttpPerformanceSource::new(base, Duration::from_secs(5)).unwrap();
        assert!(matches!(
            source.fetch("/broken").await,
            Err(ChartFailure::SchemaInvalid(_))
        ));

        let source =
            HttpPerformanceSource::new("http://127.0.0.1:9".to_string(), Duration::from_secs(2))
                .unwrap();
        assert!(matches!(
            source.fetch("/performance_data").await,
            Err(ChartFailure::Network(_))
        ));
    }

    #[test]
    fn test_status_failure_parsing() {
        let cases = [
            (403, r#"{"error": "Unauthorized access"}"#, "Unauthorized access"),
            (403, r#"{"error": ""}"#, "HTTP 403"),
            (500, r#"{"message": "x"}"#, "HTTP 500"),
            (502, "", "HTTP 502"),
        ];

        for (status, body, expected) in cases {
            assert_eq!(status_failure(status, body).to_string(), expected);
        }
    }
}
