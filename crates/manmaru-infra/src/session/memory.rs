//! In-memory session store backed by `DashMap`.
//!
//! Transcripts are cloned on read so no `DashMap` guard outlives a call,
//! and no guard is ever held across an `.await`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use manmaru_core::session::store::SessionStore;
use manmaru_types::error::StoreError;
use manmaru_types::session::SessionId;
use manmaru_types::turn::Turn;

#[derive(Debug, Clone)]
struct Entry {
    turns: Vec<Turn>,
    touched_at: Instant,
}

/// Process-local transcript store, one entry per session.
///
/// Cloning produces a shared view of the same underlying map (backed by `Arc`).
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<DashMap<SessionId, Entry>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn load(&self, session: &SessionId) -> Result<Option<Vec<Turn>>, StoreError> {
        Ok(self.inner.get_mut(session).map(|mut entry| {
            entry.touched_at = Instant::now();
            entry.turns.clone()
        }))
    }

    async fn save(&self, session: &SessionId, turns: Vec<Turn>) -> Result<(), StoreError> {
        self.inner.insert(
            *session,
            Entry {
                turns,
                touched_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn remove(&self, session: &SessionId) -> Result<(), StoreError> {
        self.inner.remove(session);
        Ok(())
    }

    async fn purge_expired(&self, max_idle: Duration) -> Result<usize, StoreError> {
        let before = self.inner.len();
        self.inner
            .retain(|_, entry| entry.touched_at.elapsed() <= max_idle);
        let evicted = before.saturating_sub(self.inner.len());
        if evicted > 0 {
            tracing::info!(evicted, remaining = self.inner.len(), "Evicted idle sessions");
        }
        Ok(evicted)
    }
}
