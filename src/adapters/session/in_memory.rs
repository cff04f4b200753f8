//! In-memory session store.
//!
//! Holds one record per browser session behind an `RwLock`. Records expire
//! after a time-to-live measured from their last access; expired records are
//! dropped lazily when touched. Suitable for a single-process deployment,
//! which is all this relay needs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::ports::{ConversationId, SessionId, SessionRecord, SessionStore};

struct Entry {
    record: SessionRecord,
    last_seen: Instant,
}

/// In-memory implementation of the session store port.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    /// Creates a store whose sessions expire `ttl` after their last access.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        entry.last_seen.elapsed() >= self.ttl
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Option<SessionRecord> {
        let mut sessions = self.sessions.write().unwrap();

        let expired = matches!(sessions.get(id), Some(entry) if self.is_expired(entry));
        if expired {
            sessions.remove(id);
            tracing::debug!(session = %id, "dropped expired session");
            return None;
        }

        sessions.get_mut(id).map(|entry| {
            entry.last_seen = Instant::now();
            entry.record.clone()
        })
    }

    async fn create(&self) -> SessionId {
        let id = SessionId::generate();
        let entry = Entry {
            record: SessionRecord::default(),
            last_seen: Instant::now(),
        };
        self.sessions.write().unwrap().insert(id, entry);
        tracing::debug!(session = %id, "created session");
        id
    }

    async fn set_conversation(&self, id: &SessionId, conversation: ConversationId) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(entry) = sessions.get_mut(id) {
            entry.record.conversation = Some(conversation);
        }
    }
}
