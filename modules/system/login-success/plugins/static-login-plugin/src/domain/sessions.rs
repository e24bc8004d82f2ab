//! In-memory session store.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use login_success_sdk::{LoginSuccessError, SessionStore};
use tracing::debug;

const SESSION_ID_LEN: usize = 32;

/// Session lifetime used by [`InMemorySessionStore::new`].
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
struct SessionState {
    saved_request: Option<String>,
    created_at: Instant,
}

impl SessionState {
    fn fresh() -> Self {
        Self {
            saved_request: None,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Session ids mapped to their pre-login state.
///
/// Sessions live for `ttl` after their last rotation. Expired sessions are
/// evicted on every rotation, so the map stays bounded by the login rate.
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionState>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Open a session with a saved pre-login request target.
    pub fn save_request(&self, session_id: &str, target: impl Into<String>) {
        self.sessions
            .entry(session_id.to_owned())
            .or_insert_with(SessionState::fresh)
            .saved_request = Some(target.into());
    }

    #[must_use]
    pub fn saved_request(&self, session_id: &str) -> Option<String> {
        self.sessions
            .get(session_id)
            .and_then(|s| s.saved_request.clone())
    }

    #[must_use]
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session older than the TTL at `now`.
    pub fn evict_expired(&self, now: Instant) {
        let before = self.sessions.len();
        self.sessions.retain(|_, state| !state.is_expired(self.ttl, now));
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            debug!(evicted, remaining = self.sessions.len(), "Evicted expired sessions");
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn rotate(&self, current: Option<&str>) -> Result<String, LoginSuccessError> {
        self.evict_expired(Instant::now());

        let mut state = current
            .and_then(|id| self.sessions.remove(id))
            .map_or_else(SessionState::fresh, |(_, state)| state);
        state.created_at = Instant::now();

        let mut id = nanoid::nanoid!(SESSION_ID_LEN);
        while self.sessions.contains_key(&id) || current == Some(id.as_str()) {
            id = nanoid::nanoid!(SESSION_ID_LEN);
        }
        self.sessions.insert(id.clone(), state);
        debug!(migrated = current.is_some(), "Session rotated");
        Ok(id)
    }

    async fn clear_saved_request(&self, session_id: &str) -> Result<(), LoginSuccessError> {
        if let Some(mut state) = self.sessions.get_mut(session_id) {
            state.saved_request = None;
        }
        Ok(())
    }
}
