//! OllamaProvider -- concrete [`LlmProvider`] for a local Ollama server.
//!
//! Sends the whole transcript to `/api/chat` with streaming disabled and
//! returns the `message.content` of the reply.

use std::time::Duration;

use manmaru_core::llm::provider::LlmProvider;
use manmaru_types::config::RelayConfig;
use manmaru_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use super::types::{OllamaChatRequest, OllamaChatResponse, OllamaErrorBody};

/// How long to wait for the TCP/TLS connection before giving up.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body excerpt carried into an [`LlmError`].
const MAX_ERROR_BODY: usize = 512;

/// Ollama chat-completion provider.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
}

impl OllamaProvider {
    /// Create a provider posting to `url` (e.g. `http://localhost:11434/api/chat`).
    ///
    /// `request_timeout` bounds the whole HTTP round-trip at the transport level.
    pub fn new(url: impl Into<String>, request_timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| LlmError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Build a provider from the relay configuration.
    pub fn from_config(config: &RelayConfig) -> Result<Self, LlmError> {
        Self::new(config.inference_url.clone(), config.inference_timeout())
    }

    /// The chat endpoint this provider posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = OllamaChatRequest {
            model: &request.model,
            messages: &request.messages,
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<OllamaErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or_else(|_| excerpt(&text));
            return Err(LlmError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OllamaChatResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::Deserialization(format!("failed to parse chat response: {e}"))
        })?;

        if let Some(role) = parsed.message.role.as_deref() {
            if role != "assistant" {
                tracing::debug!(role, "Chat response carried a non-assistant role");
            }
        }

        Ok(CompletionResponse {
            content: parsed.message.content,
            model: parsed.model.unwrap_or_else(|| request.model.clone()),
            done_reason: parsed.done_reason,
            usage: Usage {
                input_tokens: parsed.prompt_eval_count.unwrap_or(0),
                output_tokens: parsed.eval_count.unwrap_or(0),
            },
        })
    }
}

/// Map a reqwest transport failure to an [`LlmError`].
fn map_transport_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else if err.is_decode() {
        LlmError::Deserialization(err.to_string())
    } else {
        LlmError::Unavailable(err.to_string())
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
