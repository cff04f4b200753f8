//! Docsbot - Assistant Relay Backend
//!
//! This crate relays questions from a single-page browser client to an
//! assistants API, mapping each browser session to a provider-side
//! conversation and polling asynchronous runs to completion.

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
