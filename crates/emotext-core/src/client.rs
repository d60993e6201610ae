//! HTTP client for the upstream text-to-emotion API.
//!
//! The service accepts `{"text": ...}` with an `apikey` header and answers
//! with a map of emotion names to scores, or an error body carrying a
//! `message` field.

use async_trait::async_trait;
use tracing::debug;

use crate::config::{ApiKey, EmotionConfig};
use crate::error::EmotionResult;
use crate::model::{AnalysisRequest, UpstreamReply};

/// Header the upstream service reads the credential from.
pub const API_KEY_HEADER: &str = "apikey";

/// Anything that can classify text into emotions.
#[async_trait]
pub trait EmotionApi: Send + Sync {
    /// Send one request upstream and return the raw reply.
    ///
    /// Only transport failures are errors here; a non-success status is a
    /// regular reply.
    async fn detect(&self, request: &AnalysisRequest) -> EmotionResult<UpstreamReply>;
}

/// reqwest-backed client for the apilayer text-to-emotion endpoint.
#[derive(Clone)]
pub struct ApiLayerClient {
    api_url: String,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl ApiLayerClient {
    /// Create a client from resolved configuration.
    pub fn new(config: &EmotionConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            client,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl EmotionApi for ApiLayerClient {
    async fn detect(&self, request: &AnalysisRequest) -> EmotionResult<UpstreamReply> {
        debug!(url = %self.api_url, chars = request.text.chars().count(), "Calling emotion API");

        let response = self
            .client
            .post(&self.api_url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!(status, bytes = body.len(), "Emotion API replied");

        Ok(UpstreamReply::new(status, body))
    }
}
