//! Emotion proxy route handler.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use emotext_core::ProxyOutcome;
use serde::Serialize;

use crate::state::AppState;

/// JSON error body: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// HTTP rendering of a [`ProxyOutcome`].
pub struct ProxyResponse(pub ProxyOutcome);

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match self.0 {
            ProxyOutcome::Success(body) => {
                (StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response()
            }
            outcome => {
                let error = outcome.error_message().unwrap_or_default().to_string();
                (status, Json(ErrorResponse { error })).into_response()
            }
        }
    }
}

/// POST /api/emotion - Forward `{text}` to the emotion API.
///
/// The body is taken raw so that malformed or incomplete JSON gets the same
/// `Text is required` answer as an empty string.
pub async fn analyze(State(state): State<AppState>, body: Bytes) -> ProxyResponse {
    ProxyResponse(state.service.analyze(&body).await)
}
