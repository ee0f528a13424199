//! Ollama chat provider.
//!
//! Talks to a locally hosted Ollama server over its native `/api/chat`
//! endpoint in non-streaming mode.

pub mod client;
pub mod types;

pub use client::OllamaProvider;
