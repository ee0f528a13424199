//! Conversation relay: persona initialization and chat exchanges.

pub mod service;
