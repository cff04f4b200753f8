//! OpenAI Assistants Client - Implementation of AssistantClient for the
//! OpenAI Assistants v2 API.
//!
//! Conversations map to provider threads; runs are polled by the caller.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiAssistantConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = OpenAiAssistantClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{AssistantClient, AssistantError, ConversationId, RunId, RunStatus};

/// Configuration for the OpenAI assistants client.
#[derive(Debug, Clone)]
pub struct OpenAiAssistantConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiAssistantConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Assistants API client.
pub struct OpenAiAssistantClient {
    config: OpenAiAssistantConfig,
    client: Client,
}

impl OpenAiAssistantClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: OpenAiAssistantConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Builds a request with the auth and beta headers every call needs.
    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("OpenAI-Beta", "assistants=v2")
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Response, AssistantError> {
        let response = self.request(builder).send().await.map_err(|e| {
            if e.is_timeout() {
                AssistantError::Timeout {
                    timeout_secs: self.config.timeout.as_secs() as u32,
                }
            } else if e.is_connect() {
                AssistantError::network(format!("Connection failed: {}", e))
            } else {
                AssistantError::network(e.to_string())
            }
        })?;

        self.handle_response_status(response).await
    }

    /// Parses the API response status and maps errors.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, AssistantError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(AssistantError::AuthenticationFailed),
            429 => Err(AssistantError::RateLimited),
            500..=599 => Err(AssistantError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AssistantError::protocol(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, AssistantError> {
        response
            .json()
            .await
            .map_err(|e| AssistantError::protocol(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl AssistantClient for OpenAiAssistantClient {
    async fn create_conversation(&self) -> Result<ConversationId, AssistantError> {
        let response = self
            .send(
                self.client
                    .post(self.url("/threads"))
                    .json(&serde_json::json!({})),
            )
            .await?;

        let thread: ThreadObject = Self::parse(response).await?;
        Ok(ConversationId::new(thread.id))
    }

    async fn add_user_message(
        &self,
        conversation: &ConversationId,
        content: &str,
    ) -> Result<(), AssistantError> {
        let body = CreateMessageRequest {
            role: "user",
            content,
        };
        self.send(
            self.client
                .post(self.url(&format!("/threads/{}/messages", conversation)))
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn create_run(
        &self,
        conversation: &ConversationId,
        assistant_id: &str,
    ) -> Result<RunId, AssistantError> {
        let body = CreateRunRequest { assistant_id };
        let response = self
            .send(
                self.client
                    .post(self.url(&format!("/threads/{}/runs", conversation)))
                    .json(&body),
            )
            .await?;

        let run: RunObject = Self::parse(response).await?;
        Ok(RunId::new(run.id))
    }

    async fn run_status(
        &self,
        conversation: &ConversationId,
        run: &RunId,
    ) -> Result<RunStatus, AssistantError> {
        let response = self
            .send(
                self.client
                    .get(self.url(&format!("/threads/{}/runs/{}", conversation, run))),
            )
            .await?;

        let run: RunObject = Self::parse(response).await?;
        Ok(run.status)
    }

    async fn latest_message(
        &self,
        conversation: &ConversationId,
    ) -> Result<String, AssistantError> {
        let response = self
            .send(
                self.client
                    .get(self.url(&format!("/threads/{}/messages", conversation))),
            )
            .await?;

        let list: MessageListObject = Self::parse(response).await?;

        // The list is newest-first; the answer is the first text part of the
        // first message.
        let message = list
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AssistantError::protocol("Conversation has no messages"))?;

        message
            .content
            .into_iter()
            .find_map(|part| part.text.map(|t| t.value))
            .ok_or_else(|| AssistantError::protocol("Message has no text content"))
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ThreadObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RunObject {
    id: String,
    status: RunStatus,
}

#[derive(Debug, Deserialize)]
struct MessageListObject {
    data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
struct MessageObject {
    content: Vec<MessageContentPart>,
}

#[derive(Debug, Deserialize)]
struct MessageContentPart {
    #[serde(default)]
    text: Option<TextContent>,
}

#[derive(Debug, Deserialize)]
struct TextContent {
    value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = OpenAiAssistantConfig::new("test-key")
            .with_base_url("https://custom.api.com/v1")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn parses_thread_object() {
        let json = r#"{"id":"thread_abc123","object":"thread","created_at":1699000000}"#;
        let thread: ThreadObject = serde_json::from_str(json).unwrap();
        assert_eq!(thread.id, "thread_abc123");
    }

    #[test]
    fn parses_run_object() {
        let json = r#"{"id":"run_abc123","object":"thread.run","status":"in_progress","assistant_id":"asst_1"}"#;
        let run: RunObject = serde_json::from_str(json).unwrap();
        assert_eq!(run.id, "run_abc123");
        assert_eq!(run.status, RunStatus::InProgress);
    }

    #[test]
    fn parses_message_list_and_extracts_text() {
        let json = r#"{
            "object": "list",
            "data": [
                {
                    "id": "msg_2",
                    "role": "assistant",
                    "content": [
                        {"type": "text", "text": {"value": "The answer.", "annotations": []}}
                    ]
                },
                {
                    "id": "msg_1",
                    "role": "user",
                    "content": [
                        {"type": "text", "text": {"value": "The question.", "annotations": []}}
                    ]
                }
            ]
        }"#;
        let list: MessageListObject = serde_json::from_str(json).unwrap();
        assert_eq!(list.data.len(), 2);

        let text = list.data[0].content[0].text.as_ref().unwrap();
        assert_eq!(text.value, "The answer.");
    }

    #[test]
    fn tolerates_non_text_content_parts() {
        let json = r#"{
            "data": [
                {
                    "id": "msg_1",
                    "content": [
                        {"type": "image_file", "image_file": {"file_id": "file_1"}},
                        {"type": "text", "text": {"value": "caption", "annotations": []}}
                    ]
                }
            ]
        }"#;
        let list: MessageListObject = serde_json::from_str(json).unwrap();
        let message = &list.data[0];
        assert!(message.content[0].text.is_none());
        assert_eq!(message.content[1].text.as_ref().unwrap().value, "caption");
    }
}
