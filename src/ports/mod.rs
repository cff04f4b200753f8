//! Ports - interfaces between the application core and external collaborators.

mod assistant;
mod session_store;

pub use assistant::{AssistantClient, AssistantError, ConversationId, RunId, RunStatus};
pub use session_store::{SessionId, SessionRecord, SessionStore};
