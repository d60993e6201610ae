//! Proxy mapping between callers and the upstream emotion API.
//!
//! Every invocation ends in exactly one [`ProxyOutcome`]:
//! - the text is missing or empty: rejected with 400, nothing sent upstream
//! - upstream answered with a failure status: its message and status relayed
//! - upstream answered with a JSON success body: that body relayed verbatim
//! - anything else: a generic internal error, details only in the logs

use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, error};

use crate::client::EmotionApi;
use crate::error::{EmotionError, EmotionResult, INTERNAL_ERROR_MESSAGE};
use crate::model::{AnalysisRequest, EmotionScores, UpstreamReply};

/// Fallback when the upstream error body has no usable `message`.
pub const UPSTREAM_ERROR_FALLBACK: &str = "Error from emotion API";

/// Client-facing result of one proxy invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyOutcome {
    /// Upstream JSON body, unchanged.
    Success(Bytes),
    /// A failure the caller may see, with the status to report.
    Rejected { status: u16, message: String },
    /// Anything unexpected. Reported as 500 with a generic message.
    Internal,
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

impl ProxyOutcome {
    /// Map a raw upstream reply to the outcome the caller sees.
    pub fn from_reply(reply: UpstreamReply) -> Self {
        match Self::interpret(reply) {
            Ok(body) => Self::Success(body),
            Err(e) => Self::from_error(&e),
        }
    }

    /// Map an error to the outcome the caller sees.
    pub fn from_error(err: &EmotionError) -> Self {
        match err {
            EmotionError::Validation(message) => Self::Rejected {
                status: 400,
                message: message.clone(),
            },
            EmotionError::Upstream { status, message } if (400..600).contains(status) => {
                Self::Rejected {
                    status: *status,
                    message: message.clone(),
                }
            }
            _ => Self::Internal,
        }
    }

    /// Status code to answer with.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success(_) => 200,
            Self::Rejected { status, .. } => *status,
            Self::Internal => 500,
        }
    }

    /// Error message for the caller, if this is a failure.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Rejected { message, .. } => Some(message),
            Self::Internal => Some(INTERNAL_ERROR_MESSAGE),
        }
    }

    /// Turn a raw reply into either the success body or an error.
    fn interpret(reply: UpstreamReply) -> EmotionResult<Bytes> {
        if !reply.is_success() {
            let message = serde_json::from_slice::<UpstreamErrorBody>(&reply.body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UPSTREAM_ERROR_FALLBACK.to_string());

            error!(
                status = reply.status,
                body = %String::from_utf8_lossy(&reply.body),
                "Error from emotion API"
            );

            return Err(EmotionError::Upstream {
                status: reply.status,
                message,
            });
        }

        serde_json::from_slice::<serde_json::Value>(&reply.body).map_err(|e| {
            error!(status = reply.status, error = %e, "Emotion API returned a malformed body");
            EmotionError::MalformedResponse(e.to_string())
        })?;

        Ok(reply.body)
    }
}

/// Validates requests and forwards them to an [`EmotionApi`].
#[derive(Clone)]
pub struct EmotionService {
    api: Arc<dyn EmotionApi>,
}

impl EmotionService {
    pub fn new(api: Arc<dyn EmotionApi>) -> Self {
        Self { api }
    }

    /// Handle one raw JSON request body end to end.
    pub async fn analyze(&self, body: &[u8]) -> ProxyOutcome {
        let request = match AnalysisRequest::from_json(body) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Rejected analysis request");
                return ProxyOutcome::from_error(&e);
            }
        };

        self.forward(&request).await
    }

    /// Forward an already validated request.
    pub async fn forward(&self, request: &AnalysisRequest) -> ProxyOutcome {
        match self.api.detect(request).await {
            Ok(reply) => ProxyOutcome::from_reply(reply),
            Err(e) => {
                error!(error = %e, "Error in emotion analysis");
                ProxyOutcome::Internal
            }
        }
    }

    /// Analyze text and decode the scores, for in-process callers.
    ///
    /// The error is the message a caller is allowed to see.
    pub async fn analyze_text(&self, text: &str) -> Result<EmotionScores, String> {
        let request = AnalysisRequest::new(text).map_err(|e| e.client_message())?;

        match self.forward(&request).await {
            ProxyOutcome::Success(body) => EmotionScores::from_json(&body).map_err(|e| {
                error!(error = %e, "Emotion API body is not a score map");
                INTERNAL_ERROR_MESSAGE.to_string()
            }),
            outcome => Err(outcome
                .error_message()
                .unwrap_or(INTERNAL_ERROR_MESSAGE)
                .to_string()),
        }
    }
}
