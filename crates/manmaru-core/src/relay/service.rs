//! Relay service driving one conversation exchange at a time.
//!
//! RelayService owns the provider and the session store and implements the
//! two client operations: seeding a transcript with a persona, and relaying
//! a user message to the inference endpoint.
//!
//! An exchange computes the next transcript from a snapshot and commits it
//! only after the provider succeeds, so a failed call leaves the stored
//! transcript exactly as it was.

use std::time::{Duration, Instant};

use manmaru_types::config::RelayConfig;
use manmaru_types::error::RelayError;
use manmaru_types::llm::CompletionRequest;
use manmaru_types::persona::Persona;
use manmaru_types::session::SessionId;
use manmaru_types::turn::Turn;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::llm::provider::LlmProvider;
use crate::session::store::SessionStore;
use crate::transcript;

/// Orchestrates persona initialization and chat exchanges.
///
/// Generic over `LlmProvider` and `SessionStore` to maintain clean
/// architecture (manmaru-core never depends on manmaru-infra).
pub struct RelayService<P: LlmProvider, S: SessionStore> {
    provider: P,
    store: S,
    model: String,
    transcript_cap: usize,
    inference_timeout: Duration,
}

impl<P: LlmProvider, S: SessionStore> RelayService<P, S> {
    /// Create a relay service from the startup configuration.
    pub fn new(config: &RelayConfig, provider: P, store: S) -> Self {
        Self {
            provider,
            store,
            model: config.model.clone(),
            transcript_cap: config.transcript_cap,
            inference_timeout: config.inference_timeout(),
        }
    }

    /// Access the session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Replace the session's transcript with the persona's system turn.
    ///
    /// Discards any prior history for the session.
    pub async fn initialize(&self, session: &SessionId, persona: Persona) -> Result<(), RelayError> {
        self.store.save(session, transcript::seed(persona)).await?;
        info!(session_id = %session, persona = %persona, "Transcript initialized");
        Ok(())
    }

    /// Relay one user message and return the assistant's reply.
    ///
    /// A session without a transcript starts from an empty one. On success
    /// the stored transcript gains the user and assistant turns and is cut
    /// to the configured window. On failure nothing is written.
    pub async fn exchange(&self, session: &SessionId, message: &str) -> Result<String, RelayError> {
        if message.trim().is_empty() {
            return Err(RelayError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }

        let snapshot = self.store.load(session).await?.unwrap_or_default();
        let candidate = transcript::with_turn(&snapshot, Turn::user(message));

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: candidate,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            session_id = %session,
            transcript_len = request.messages.len(),
        );

        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.inference_timeout,
            self.provider.complete(&request).instrument(span),
        )
        .await;

        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(session_id = %session, error = %e, "Inference call failed; transcript unchanged");
                return Err(e.into());
            }
            Err(_) => {
                warn!(
                    session_id = %session,
                    timeout_ms = self.inference_timeout.as_millis() as u64,
                    "Inference call timed out; transcript unchanged"
                );
                return Err(RelayError::Timeout(self.inference_timeout));
            }
        };

        let reply = response.content;
        let next = transcript::truncate(
            transcript::with_turn(&request.messages, Turn::assistant(reply.clone())),
            self.transcript_cap,
        );
        let stored_len = next.len();
        self.store.save(session, next).await?;

        debug!(
            session_id = %session,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Usage reported"
        );
        info!(
            session_id = %session,
            model = %response.model,
            transcript_len = stored_len,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Exchange completed"
        );

        Ok(reply)
    }

    /// Snapshot of a session's transcript (empty for unknown sessions).
    pub async fn transcript(&self, session: &SessionId) -> Result<Vec<Turn>, RelayError> {
        Ok(self.store.load(session).await?.unwrap_or_default())
    }
}
