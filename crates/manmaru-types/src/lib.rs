//! Shared domain types for manmaru.
//!
//! This crate contains the core types used across the relay: conversation
//! turns, personas, LLM request/response shapes, configuration, and errors.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod persona;
pub mod session;
pub mod turn;
