//! Relay configuration types.
//!
//! `RelayConfig` represents `config.toml` in the data directory. Every field
//! has a default, so an empty or missing file yields a working local setup
//! pointed at an Ollama instance on `localhost:11434`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Process-wide relay configuration, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Chat endpoint of the local inference server.
    #[serde(default = "default_inference_url")]
    pub inference_url: String,

    /// Model identifier sent with every inference request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum number of turns kept per transcript after each exchange.
    #[serde(default = "default_transcript_cap")]
    pub transcript_cap: usize,

    /// Deadline for one inference call, in seconds.
    #[serde(default = "default_inference_timeout_secs")]
    pub inference_timeout_secs: u64,

    /// Sessions idle longer than this are evicted, in seconds.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Key for signing session cookies. A random per-process key is used
    /// when absent, which invalidates all sessions on restart.
    #[serde(default)]
    pub session_secret: Option<String>,

    /// Directory holding the static front-end page.
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

fn default_inference_url() -> String {
    "http://localhost:11434/api/chat".to_string()
}

fn default_model() -> String {
    "qwen2.5:3b".to_string()
}

fn default_transcript_cap() -> usize {
    20
}

fn default_inference_timeout_secs() -> u64 {
    120
}

fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_web_dir() -> String {
    "public".to_string()
}

impl RelayConfig {
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            inference_url: default_inference_url(),
            model: default_model(),
            transcript_cap: default_transcript_cap(),
            inference_timeout_secs: default_inference_timeout_secs(),
            session_ttl_secs: default_session_ttl_secs(),
            session_secret: None,
            web_dir: default_web_dir(),
        }
    }
}
