//! Application layer - use-case handlers over the ports.

pub mod ask;

pub use ask::{AskError, AskQuestionCommand, AskQuestionHandler, AskQuestionResult};
