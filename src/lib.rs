//! LearnEX AI Chat Proxy
//!
//! Stateless HTTP service sitting between the LearnEX UI and two external
//! LLM providers. Each request carries one user message plus the client's
//! recent conversation history; the proxy trims the history to a bounded
//! window, forwards the exchange to the selected provider, and returns a
//! normalized reply envelope.
//!
//! ## Module Structure
//!
//! - `conversation`: chat turns and the bounded history window
//! - `provider`: provider selection and per-provider wire formats
//! - `config`: credential and endpoint configuration
//! - `client`: outbound completion calls
//! - `error`: failure kinds and their HTTP surface
//! - `server`: axum routes and server startup

/// Chat turns and the bounded history window
pub mod conversation;

/// Provider selection and wire formats
pub mod provider;

/// Proxy configuration
pub mod config;

/// Outbound LLM calls
pub mod client;

/// Error kinds
pub mod error;

/// HTTP surface
pub mod server;

pub use client::LlmClient;
pub use config::{ProviderSettings, ProxyConfig};
pub use conversation::{window, ChatTurn, Role, HISTORY_WINDOW};
pub use error::ChatError;
pub use provider::Provider;
pub use server::{build_router, run_server, ChatReply, ChatRequest};
