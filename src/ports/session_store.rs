//! Session Store Port - cookie-keyed per-browser state.
//!
//! A session exists solely to remember which provider conversation a browser
//! is talking to. Records are ephemeral; stores are expected to expire them
//! after a time-to-live rather than requiring explicit destruction.

use async_trait::async_trait;
use uuid::Uuid;

use super::assistant::ConversationId;

/// Opaque session identifier carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Server-side state associated with one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRecord {
    /// Provider conversation this session is bound to, once one exists.
    pub conversation: Option<ConversationId>,
}

/// Port for session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a live session, refreshing its time-to-live.
    ///
    /// Returns `None` for unknown or expired identifiers.
    async fn load(&self, id: &SessionId) -> Option<SessionRecord>;

    /// Create a fresh, empty session.
    async fn create(&self) -> SessionId;

    /// Bind a session to a provider conversation.
    ///
    /// A no-op if the session has meanwhile expired.
    async fn set_conversation(&self, id: &SessionId, conversation: ConversationId);
}
