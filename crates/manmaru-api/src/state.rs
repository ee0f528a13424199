//! Application state wiring the relay service together.
//!
//! AppState holds the concrete service instance used by both the CLI and the
//! HTTP handlers. RelayService is generic over the provider and store traits;
//! AppState pins it to the type-erased provider and the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use manmaru_core::llm::box_provider::BoxLlmProvider;
use manmaru_core::relay::service::RelayService;
use manmaru_core::session::store::SessionStore;
use manmaru_infra::llm::ollama::OllamaProvider;
use manmaru_infra::session::cookie::SessionCookieSigner;
use manmaru_infra::session::memory::InMemorySessionStore;
use manmaru_types::config::RelayConfig;

/// How often idle sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Relay service pinned to the infra implementations.
pub type ConcreteRelayService = RelayService<BoxLlmProvider, InMemorySessionStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelayService>,
    pub signer: SessionCookieSigner,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    /// Wire the Ollama provider and an empty session store from `config`.
    pub fn init(config: RelayConfig) -> anyhow::Result<Self> {
        let provider = OllamaProvider::from_config(&config)?;
        tracing::info!(
            url = %provider.url(),
            model = %config.model,
            timeout_secs = config.inference_timeout_secs,
            "Inference endpoint configured"
        );
        Ok(Self::with_provider(config, BoxLlmProvider::new(provider)))
    }

    /// Wire the state around an arbitrary provider.
    pub fn with_provider(config: RelayConfig, provider: BoxLlmProvider) -> Self {
        let signer = SessionCookieSigner::from_config(&config);
        let relay = RelayService::new(&config, provider, InMemorySessionStore::new());
        Self {
            relay: Arc::new(relay),
            signer,
            config: Arc::new(config),
        }
    }

    /// Periodically evict sessions idle longer than `session_ttl_secs`.
    pub fn spawn_session_sweeper(&self) -> tokio::task::JoinHandle<()> {
        let relay = Arc::clone(&self.relay);
        let ttl = self.config.session_ttl();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = relay.store().purge_expired(ttl).await {
                    tracing::warn!(error = %e, "Session sweep failed");
                }
            }
        })
    }
}
