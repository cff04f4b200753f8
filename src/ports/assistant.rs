//! Assistant Client Port - Interface for the remote assistants API.
//!
//! This port abstracts the provider's conversation/message/run surface,
//! enabling the ask flow to relay questions without coupling to a specific
//! provider SDK or wire format.
//!
//! # Design
//!
//! - Conversations and runs are owned by the provider and referenced here
//!   by opaque identifiers
//! - A run is an asynchronous job; callers poll [`AssistantClient::run_status`]
//!   until it reaches a terminal status
//! - Error types for common failure modes (auth, rate limits, network)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the remote assistants API.
///
/// Implementations connect to the external provider and translate between
/// its wire format and these identifiers.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Create a new provider-side conversation.
    async fn create_conversation(&self) -> Result<ConversationId, AssistantError>;

    /// Append a user message to a conversation.
    async fn add_user_message(
        &self,
        conversation: &ConversationId,
        content: &str,
    ) -> Result<(), AssistantError>;

    /// Start a run processing the conversation's latest messages against
    /// the given assistant.
    async fn create_run(
        &self,
        conversation: &ConversationId,
        assistant_id: &str,
    ) -> Result<RunId, AssistantError>;

    /// Fetch the current status of a run.
    async fn run_status(
        &self,
        conversation: &ConversationId,
        run: &RunId,
    ) -> Result<RunStatus, AssistantError>;

    /// Fetch the text of the most recent message in a conversation.
    async fn latest_message(
        &self,
        conversation: &ConversationId,
    ) -> Result<String, AssistantError>;
}

/// Opaque provider-owned conversation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Wraps a provider-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque provider-owned run identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Wraps a provider-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a provider-side run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Expired,
    /// Any status this client does not model (e.g. tool-call handoffs).
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Returns true if the run finished successfully.
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }

    /// Returns true if the run can no longer complete.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }
}

/// Assistant client errors.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by provider.
    #[error("rate limited by provider")]
    RateLimited,

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Response did not match the expected wire format.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl AssistantError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
