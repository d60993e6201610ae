//! Backend that reaches the proxy endpoint over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Backend, CONNECT_ERROR, GENERIC_ERROR};
use crate::model::{AnalysisRequest, EmotionScores};

/// Path of the proxy endpoint on an emotext server.
pub const EMOTION_ENDPOINT: &str = "/api/emotion";

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Calls `POST /api/emotion` on a running emotext server.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, EMOTION_ENDPOINT)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn analyze(&self, text: &str) -> Result<EmotionScores, String> {
        // Sent as is; the server owns validation.
        let request = AnalysisRequest {
            text: text.to_string(),
        };
        let url = self.endpoint();

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to reach emotext server");
                return Err(CONNECT_ERROR.to_string());
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read emotext server response");
                return Err(CONNECT_ERROR.to_string());
            }
        };

        debug!(status = %status, bytes = body.len(), "emotext server replied");

        if status.is_success() {
            EmotionScores::from_json(&body).map_err(|e| {
                warn!(error = %e, "Unexpected emotion response body");
                CONNECT_ERROR.to_string()
            })
        } else {
            // A non-JSON error body is reported like a failed request.
            let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
                warn!(status = %status, error = %e, "emotext server sent a non-JSON error body");
                CONNECT_ERROR.to_string()
            })?;

            Err(serde_json::from_value::<ErrorBody>(value)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_ERROR.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_success_returns_scores() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/emotion"))
            .and(body_json(serde_json::json!({ "text": "I am happy" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"Happy":0.9,"Angry":0.0}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&format!("{}/", server.uri()));
        let scores = backend.analyze("I am happy").await.unwrap();
        assert_eq!(scores.labels(), vec!["Happy", "Angry"]);
    }

    #[tokio::test]
    async fn test_error_field_is_shown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({ "error": "Text is required" })),
            )
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri());
        assert_eq!(backend.analyze("").await.unwrap_err(), "Text is required");
    }

    #[tokio::test]
    async fn test_json_error_without_field_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({ "status": "down" })))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri());
        assert_eq!(backend.analyze("hi").await.unwrap_err(), GENERIC_ERROR);
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_connect_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let backend = HttpBackend::new(&server.uri());
        assert_eq!(backend.analyze("hi").await.unwrap_err(), CONNECT_ERROR);
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let backend = HttpBackend::new("http://127.0.0.1:1");
        assert_eq!(backend.analyze("hi").await.unwrap_err(), CONNECT_ERROR);
    }
}
