//! Moderated group chat relay.
//!
//! Clients connect over WebSocket, announce an identity, exchange broadcast
//! messages, and moderators can ban/unban participants and triage feature
//! requests. The authoritative state lives in a single in-memory Registry
//! guarded by one lock; every connection event is applied and fanned out
//! through the gateway inside that lock.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{run, serve};
