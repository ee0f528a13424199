//! Infrastructure implementations for manmaru.
//!
//! Concrete adapters for the ports defined in manmaru-core: the Ollama
//! chat client, the in-memory session store, session-cookie signing, and
//! the configuration loader.

pub mod config;
pub mod llm;
pub mod session;
