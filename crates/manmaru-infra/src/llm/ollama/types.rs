//! Ollama chat API types.
//!
//! These are Ollama-specific request/response structures for `/api/chat`.
//! They are NOT the generic LLM types from manmaru-types -- those are
//! provider-agnostic.

use serde::{Deserialize, Serialize};

use manmaru_types::turn::Turn;

/// Request body for `POST /api/chat`.
///
/// Serializes to `{"model": ..., "messages": [...], "stream": false}`.
#[derive(Debug, Clone, Serialize)]
pub struct OllamaChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Turn],
    pub stream: bool,
}

/// Non-streaming response body from `POST /api/chat`.
///
/// Only `message.content` is required; everything else is informational.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub message: OllamaMessage,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

/// The `message` object inside a chat response.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaMessage {
    #[serde(default)]
    pub role: Option<String>,
    pub content: String,
}

/// Error body Ollama returns alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let turns = vec![Turn::system("be kind"), Turn::user("hi")];
        let body = OllamaChatRequest {
            model: "qwen2.5:3b",
            messages: &turns,
            stream: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "qwen2.5:3b",
                "messages": [
                    {"role": "system", "content": "be kind"},
                    {"role": "user", "content": "hi"}
                ],
                "stream": false
            })
        );
    }

    #[test]
    fn test_full_response_parses() {
        let json = r#"{
            "model": "qwen2.5:3b",
            "created_at": "2026-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "今日は疲れました"},
            "done": true,
            "done_reason": "stop",
            "prompt_eval_count": 42,
            "eval_count": 7
        }"#;
        let resp: OllamaChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.message.content, "今日は疲れました");
        assert_eq!(resp.done_reason.as_deref(), Some("stop"));
        assert_eq!(resp.prompt_eval_count, Some(42));
    }

    #[test]
    fn test_minimal_response_parses() {
        let resp: OllamaChatResponse =
            serde_json::from_str(r#"{"message": {"content": "ok"}}"#).unwrap();
        assert_eq!(resp.message.content, "ok");
        assert!(resp.model.is_none());
    }

    #[test]
    fn test_missing_content_is_rejected() {
        let result = serde_json::from_str::<OllamaChatResponse>(r#"{"message": {"role": "assistant"}}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<OllamaChatResponse>(r#"{"done": true}"#);
        assert!(result.is_err());
    }
}
