//! Relay logic and port (trait) definitions for manmaru.
//!
//! This crate defines the ports that the infrastructure layer implements
//! (`LlmProvider`, `SessionStore`) and the `RelayService` that drives a
//! conversation through them. It depends only on `manmaru-types` -- never
//! on `manmaru-infra` or any HTTP/IO crate.

pub mod llm;
pub mod relay;
pub mod session;
pub mod transcript;
