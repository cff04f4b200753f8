//! OpenAI adapter for the assistant client port.

mod client;

pub use client::{OpenAiAssistantClient, OpenAiAssistantConfig};
