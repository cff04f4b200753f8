//! HTTP handler for the ask endpoint.
//!
//! Resolves the caller's session from the session cookie (creating both when
//! absent or expired), relays the question through the application layer, and
//! stores a newly created conversation id back into the session.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::application::{AskError, AskQuestionCommand, AskQuestionHandler};
use crate::ports::{SessionId, SessionRecord, SessionStore};

use super::dto::{AskRequest, AskResponse, ErrorResponse};

/// Fixed message returned to the browser on any relay failure.
const GENERIC_ERROR: &str = "Failed to query the assistant";

/// Session cookie attributes.
#[derive(Debug, Clone)]
pub struct SessionCookieSettings {
    /// Cookie name.
    pub name: String,
    /// Whether to set the `Secure` flag (production only).
    pub secure: bool,
}

/// Shared application state for the ask endpoint.
#[derive(Clone)]
pub struct AskAppState {
    pub sessions: Arc<dyn SessionStore>,
    pub ask: Arc<AskQuestionHandler>,
    pub cookie: SessionCookieSettings,
}

/// POST /ask - Relay a question to the assistant.
///
/// Responds `200 {"answer": ...}` on success. Any session or provider
/// failure is logged and collapsed to `500 {"error": ...}` with a fixed
/// message.
pub async fn ask(
    State(state): State<AskAppState>,
    jar: CookieJar,
    Json(body): Json<AskRequest>,
) -> Result<(CookieJar, Json<AskResponse>), ApiError> {
    let (session_id, record, jar) = resolve_session(&state, jar).await;

    tracing::debug!(session = %session_id, conversation = ?record.conversation, "handling question");

    let result = state
        .ask
        .handle(AskQuestionCommand {
            conversation: record.conversation.clone(),
            question: body.question,
            supporting_text: body.text_content,
        })
        .await?;

    if record.conversation.is_none() {
        state
            .sessions
            .set_conversation(&session_id, result.conversation.clone())
            .await;
        tracing::info!(session = %session_id, conversation = %result.conversation, "session bound to conversation");
    }

    Ok((
        jar,
        Json(AskResponse {
            answer: result.answer,
        }),
    ))
}

/// Resolves the caller's session, creating one when the cookie is missing,
/// malformed, or names an expired session.
async fn resolve_session(
    state: &AskAppState,
    jar: CookieJar,
) -> (SessionId, SessionRecord, CookieJar) {
    if let Some(id) = jar
        .get(&state.cookie.name)
        .and_then(|c| c.value().parse::<SessionId>().ok())
    {
        if let Some(record) = state.sessions.load(&id).await {
            return (id, record, jar);
        }
    }

    let id = state.sessions.create().await;
    let jar = jar.add(session_cookie(&state.cookie, &id));
    (id, SessionRecord::default(), jar)
}

/// Builds the session cookie: `HttpOnly`, `SameSite=Lax`, `Secure` per
/// deployment environment.
fn session_cookie(settings: &SessionCookieSettings, id: &SessionId) -> Cookie<'static> {
    let mut cookie = Cookie::new(settings.name.clone(), id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(settings.secure);
    cookie
}

/// API error type mapping relay failures to HTTP responses.
#[derive(Debug)]
pub struct ApiError(AskError);

impl From<AskError> for ApiError {
    fn from(err: AskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self.0, "failed to answer question");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(GENERIC_ERROR)),
        )
            .into_response()
    }
}
