//! LLM request/response types for manmaru.
//!
//! These types are provider-agnostic. The wire shapes of a concrete
//! inference endpoint live next to its client in manmaru-infra.

use serde::{Deserialize, Serialize};

use crate::turn::Turn;

/// Request to an LLM provider for a single non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    /// Full conversation context, oldest first.
    pub messages: Vec<Turn>,
}

/// Response from an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The assistant's reply text.
    pub content: String,
    pub model: String,
    /// Provider-reported reason generation ended, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
    pub usage: Usage,
}

/// Token usage reported by the provider. Zero when the provider omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The endpoint could not be reached (connection refused, DNS, TLS).
    #[error("inference endpoint unavailable: {0}")]
    Unavailable(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("inference endpoint returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    /// The transport gave up waiting for the endpoint.
    #[error("inference request timed out")]
    Timeout,

    /// The endpoint answered but the body lacked the expected reply.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_default() {
        let usage = Usage::default();
        assert_eq!(usage.input_tokens, 0);
        assert_eq!(usage.output_tokens, 0);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Provider {
            status: 500,
            message: "model not loaded".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("model not loaded"));
    }

    #[test]
    fn test_completion_response_skips_missing_done_reason() {
        let resp = CompletionResponse {
            content: "hi".to_string(),
            model: "qwen2.5:3b".to_string(),
            done_reason: None,
            usage: Usage::default(),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert!(value.get("done_reason").is_none());
    }
}
