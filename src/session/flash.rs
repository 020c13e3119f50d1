use super::middleware::SessionId;
use crate::cache::TimedCache;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::collections::HashMap;
use std::convert::Infallible;
use std::time::Duration;

type FlashMessages = HashMap<String, Vec<String>>;

/// Per-session flash messages: key → messages queued under that key.
///
/// Reading a key drains it, so each message is shown once. A session's
/// messages vanish when the session has not been written for the TTL.
#[derive(Debug, Clone)]
pub struct FlashStore {
    sessions: TimedCache<SessionId, FlashMessages>,
}

impl FlashStore {
    /// Create a store whose sessions live `ttl_seconds` past their last write.
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_ttl(Duration::from_secs(ttl_seconds))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: TimedCache::new(ttl),
        }
    }

    /// Queue `message` under `key` for `session`.
    pub fn push(&self, session: &SessionId, key: &str, message: impl Into<String>) {
        let message = message.into();
        let queued = self.sessions.upsert_with(*session, |messages| {
            messages.entry(key.to_string()).or_default().push(message);
        });
        if queued.is_none() {
            tracing::warn!(session = %session, key = %key, "Flash store unavailable, message dropped");
        }
    }

    /// Remove and return every message queued under `key` for `session`.
    pub fn take(&self, session: &SessionId, key: &str) -> Vec<String> {
        self.sessions
            .modify(session, |messages| messages.remove(key))
            .flatten()
            .unwrap_or_default()
    }

    /// Forget sessions that expired; returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        self.sessions.purge_expired()
    }

    /// Number of sessions currently held, including expired ones.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Request-scoped handle on the current session's flash messages.
///
/// Needs [`session_middleware`](super::session_middleware) in front of the
/// handler; without it every request gets a throwaway session.
#[derive(Debug, Clone)]
pub struct Flash {
    store: FlashStore,
    session: SessionId,
}

impl Flash {
    pub fn new(store: FlashStore, session: SessionId) -> Self {
        Self { store, session }
    }

    /// Queue a message for the next page that reads `key`.
    pub fn push(&self, key: &str, message: impl Into<String>) {
        self.store.push(&self.session, key, message);
    }

    /// Drain the messages queued under `key`.
    pub fn take(&self, key: &str) -> Vec<String> {
        self.store.take(&self.session, key)
    }

    pub fn session(&self) -> SessionId {
        self.session
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
    FlashStore: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<SessionId>()
            .copied()
            .unwrap_or_default();
        Ok(Flash::new(FlashStore::from_ref(state), session))
    }
}
