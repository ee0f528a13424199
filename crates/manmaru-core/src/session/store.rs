//! SessionStore trait definition.

use std::time::Duration;

use manmaru_types::error::StoreError;
use manmaru_types::session::SessionId;
use manmaru_types::turn::Turn;

/// Per-session transcript persistence.
///
/// Implementations live in manmaru-infra (e.g., `InMemorySessionStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Sessions are independent: operations on one id never observe or mutate
/// another id's transcript.
pub trait SessionStore: Send + Sync {
    /// Load the transcript for a session, `None` if the session is unknown.
    fn load(
        &self,
        session: &SessionId,
    ) -> impl std::future::Future<Output = Result<Option<Vec<Turn>>, StoreError>> + Send;

    /// Replace the transcript for a session, creating the session if needed.
    fn save(
        &self,
        session: &SessionId,
        turns: Vec<Turn>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Forget a session entirely.
    fn remove(
        &self,
        session: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Evict sessions untouched for longer than `max_idle`. Returns how many were evicted.
    fn purge_expired(
        &self,
        max_idle: Duration,
    ) -> impl std::future::Future<Output = Result<usize, StoreError>> + Send;
}
