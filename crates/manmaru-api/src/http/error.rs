//! Application error type mapping to HTTP status codes and the error envelope.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use manmaru_types::error::{RelayError, StoreError};
use manmaru_types::llm::LlmError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or incomplete request body.
    Validation(String),
    /// The inference endpoint failed or answered with garbage.
    Inference(LlmError),
    /// The inference call hit the configured deadline.
    Timeout(Duration),
    /// The session store failed.
    Store(StoreError),
    /// Generic internal error.
    Internal(String),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::InvalidRequest(msg) => AppError::Validation(msg),
            RelayError::Inference(e) => AppError::Inference(e),
            RelayError::Timeout(limit) => AppError::Timeout(limit),
            RelayError::Store(e) => AppError::Store(e),
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Inference(LlmError::Deserialization(msg)) => (
                StatusCode::BAD_GATEWAY,
                "INFERENCE_DECODE_ERROR",
                format!("Inference endpoint returned an unreadable reply: {msg}"),
            ),
            AppError::Inference(e) => (StatusCode::BAD_GATEWAY, "INFERENCE_ERROR", e.to_string()),
            AppError::Timeout(limit) => (
                StatusCode::GATEWAY_TIMEOUT,
                "INFERENCE_TIMEOUT",
                format!("Inference endpoint did not answer within {}s", limit.as_secs()),
            ),
            AppError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SESSION_STORE_ERROR",
                e.to_string(),
            ),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, %status, "{message}");
        } else {
            tracing::debug!(code, %status, "{message}");
        }

        let body = json!({
            "data": null,
            "meta": {
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
