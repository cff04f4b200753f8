//! Assistant provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Assistant provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Provider API key
    pub api_key: Option<String>,

    /// Identifier of the assistant to run conversations against
    pub assistant_id: Option<String>,

    /// Base URL for the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Interval between run status polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum run status polls before giving up on a run
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
}

impl AssistantConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the poll interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if an assistant identifier is configured
    pub fn has_assistant_id(&self) -> bool {
        self.assistant_id.as_ref().is_some_and(|a| !a.is_empty())
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("ASSISTANT__API_KEY"));
        }
        if !self.has_assistant_id() {
            return Err(ValidationError::MissingRequired("ASSISTANT__ASSISTANT_ID"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ValidationError::InvalidPollInterval);
        }
        if self.max_poll_attempts == 0 {
            return Err(ValidationError::InvalidPollAttempts);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant_id: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_max_poll_attempts() -> u32 {
    120
}
