//! Session store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session time-to-live in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl SessionConfig {
    /// Get the session time-to-live as a Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.cookie_name.is_empty() {
            return Err(ValidationError::InvalidCookieName);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    86_400
}

fn default_cookie_name() -> String {
    "docsbot_session".to_string()
}
