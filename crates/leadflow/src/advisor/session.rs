//! In-memory conversation session store.
//!
//! The store is an explicitly owned object injected into the services
//! that need it; there is no ambient global map. Memory is bounded: a
//! TTL sweep drops idle sessions and an LRU eviction keeps the map at
//! its configured capacity. All mutations happen under one mutex, so
//! get-or-create is atomic per identifier; interleaved appends for a
//! single session across concurrent requests remain an accepted race.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

use super::domain::{Language, SessionId, Turn};

/// One conversation and its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub language: Language,
    pub turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn new(id: SessionId, language: Language) -> Self {
        let now = Utc::now();
        Self {
            id,
            language,
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Read-only view exposed by the session-status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub language: Language,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,
}

struct Entry {
    session: Session,
    last_access: Instant,
}

/// Bounded session map keyed by identifier.
pub struct SessionStore {
    config: SessionConfig,
    entries: Mutex<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch the session for `id`, creating it when absent. A supplied
    /// language updates an existing session; a generated identifier is
    /// returned for callers that passed none.
    pub fn get_or_create(&self, id: Option<&str>, language: Option<Language>) -> Session {
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        self.evict_expired(&mut guard);

        let key = match id {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => SessionId::generate().0,
        };

        if let Some(entry) = guard.get_mut(&key) {
            if let Some(language) = language {
                entry.session.language = language;
            }
            entry.last_access = Instant::now();
            return entry.session.clone();
        }

        if guard.len() >= self.config.capacity {
            Self::evict_lru(&mut guard);
        }

        let session = Session::new(SessionId(key.clone()), language.unwrap_or_default());
        guard.insert(
            key,
            Entry {
                session: session.clone(),
                last_access: Instant::now(),
            },
        );
        session
    }

    /// Append a completed user/assistant exchange and bump the update
    /// timestamp. Called only after the model reply arrived, so a failed
    /// turn never leaves a dangling user message behind.
    pub fn record_exchange(
        &self,
        id: &SessionId,
        user: Turn,
        assistant: Turn,
    ) -> Result<Session, SessionError> {
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        let entry = guard.get_mut(&id.0).ok_or(SessionError::NotFound)?;

        entry.session.turns.push(user);
        entry.session.turns.push(assistant);
        entry.session.updated_at = Utc::now();
        entry.last_access = Instant::now();

        Ok(entry.session.clone())
    }

    /// Full session clone, or `None` when unknown or expired.
    pub fn get(&self, id: &str) -> Option<Session> {
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        self.evict_expired(&mut guard);

        guard.get_mut(id).map(|entry| {
            entry.last_access = Instant::now();
            entry.session.clone()
        })
    }

    /// Metadata view without the transcript body.
    pub fn snapshot(&self, id: &str) -> Option<SessionSnapshot> {
        self.get(id).map(|session| SessionSnapshot {
            id: session.id,
            language: session.language,
            message_count: session.turns.len(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        })
    }

    /// Remove a session. Returns whether an entry existed.
    pub fn delete(&self, id: &str) -> bool {
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        guard.remove(id).is_some()
    }

    /// Current number of live sessions.
    pub fn len(&self) -> usize {
        let mut guard = self.entries.lock().expect("session mutex poisoned");
        self.evict_expired(&mut guard);
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_expired(&self, guard: &mut HashMap<String, Entry>) {
        let ttl = self.config.ttl;
        guard.retain(|_, entry| entry.last_access.elapsed() < ttl);
    }

    fn evict_lru(guard: &mut HashMap<String, Entry>) {
        let oldest = guard
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            guard.remove(&key);
        }
    }
}
