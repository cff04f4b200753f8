//! Docsbot server binary.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use docsbot::adapters::http::ask::{AskAppState, SessionCookieSettings};
use docsbot::adapters::http::app_router;
use docsbot::adapters::openai::{OpenAiAssistantClient, OpenAiAssistantConfig};
use docsbot::adapters::session::InMemorySessionStore;
use docsbot::application::AskQuestionHandler;
use docsbot::config::AppConfig;
use docsbot::ports::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let api_key = config
        .assistant
        .api_key
        .clone()
        .ok_or("assistant API key missing")?;
    let assistant_id = config
        .assistant
        .assistant_id
        .clone()
        .ok_or("assistant identifier missing")?;

    let client = OpenAiAssistantClient::new(
        OpenAiAssistantConfig::new(api_key)
            .with_base_url(config.assistant.base_url.clone())
            .with_timeout(config.assistant.timeout()),
    );

    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(config.session.ttl()));
    let ask = Arc::new(AskQuestionHandler::new(
        Arc::new(client),
        assistant_id,
        config.assistant.poll_interval(),
        config.assistant.max_poll_attempts,
    ));

    let state = AskAppState {
        sessions,
        ask,
        cookie: SessionCookieSettings {
            name: config.session.cookie_name.clone(),
            secure: config.is_production(),
        },
    };

    let app = app_router(state, &config.server);
    let addr = config.server.socket_addr();

    tracing::info!(%addr, static_dir = %config.server.static_dir, "docsbot listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
