//! HTTP adapters - Axum handlers, DTOs, and router assembly.

pub mod ask;
mod router;

pub use router::app_router;
