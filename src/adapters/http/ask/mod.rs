//! Ask endpoint - the single question/answer route.

mod dto;
mod handlers;
mod routes;

pub use dto::{AskRequest, AskResponse, ErrorResponse};
pub use handlers::{AskAppState, SessionCookieSettings};
pub use routes::ask_routes;
