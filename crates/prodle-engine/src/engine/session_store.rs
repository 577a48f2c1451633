use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
};

use chrono::{TimeDelta, Utc};
use serde::Serialize;

use super::session::GameSession;

/// A live session shared between callers. The per-session mutex serializes
/// read-modify-write cycles so concurrent guesses against the same session
/// cannot lose updates.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Aggregate counts over all live sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Concurrent keyed registry of live sessions.
///
/// The map-level `RwLock` lets different sessions proceed in parallel;
/// mutation of a single session is serialized by its own mutex. Nothing is
/// persisted: a process restart discards all sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SharedSession>>,
}

/// Recovers the guard from a poisoned session lock. A panicking guess
/// leaves a consistent-enough session to keep serving status checks.
pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, GameSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session and returns the shared handle.
    pub fn insert(&self, session: GameSession) -> SharedSession {
        let session_id = session.session_id().to_owned();
        let shared = Arc::new(Mutex::new(session));
        self.write().insert(session_id, Arc::clone(&shared));
        shared
    }

    #[must_use]
    pub fn get(&self, session_id: &str) -> Option<SharedSession> {
        self.read().get(session_id).cloned()
    }

    pub fn remove(&self, session_id: &str) -> Option<SharedSession> {
        self.write().remove(session_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drops sessions whose start time is older than `max_age`.
    ///
    /// Holds the map write lock and each session's mutex while checking, so
    /// eviction never races a mutation of the same session.
    pub fn evict_stale(&self, max_age: TimeDelta) -> usize {
        let cutoff = Utc::now() - max_age;
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, session| lock_session(session).start_time() > cutoff);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::warn!(evicted, "evicted stale sessions");
        }
        evicted
    }

    /// Point-in-time counts across all sessions.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let sessions = self.read();
        let total = sessions.len();
        let completed = sessions
            .values()
            .filter(|session| lock_session(session).is_completed())
            .count();
        StoreStats {
            total,
            active: total - completed,
            completed,
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, SharedSession>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, SharedSession>> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
