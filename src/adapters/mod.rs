//! Adapters - concrete implementations of the ports.

pub mod http;
pub mod openai;
pub mod session;
