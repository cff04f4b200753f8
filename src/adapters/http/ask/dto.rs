//! Request and response DTOs for the ask endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /ask`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// The user's question.
    pub question: String,

    /// Optional supporting text prepended to the prompt.
    ///
    /// The bundled browser client never sends this; it exists for callers
    /// that want to pass page content alongside the question.
    #[serde(default)]
    pub text_content: Option<String>,
}

/// Successful response body.
#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    /// The assistant's reply.
    pub answer: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Fixed, non-diagnostic error message.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
