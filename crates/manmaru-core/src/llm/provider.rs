//! LlmProvider trait definition.
//!
//! This is the core abstraction that inference backends implement.

use manmaru_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM inference backends (Ollama, test doubles, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in manmaru-infra (e.g., `OllamaProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send the full conversation and receive the assistant's reply.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
