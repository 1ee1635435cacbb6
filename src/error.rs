//! Failure kinds and their HTTP surface.
//!
//! Every failure is recovered at the handler boundary and rendered as a 500
//! with an `{"error": …}` body. The deployed service has always answered 500
//! for validation and configuration failures alike, and the UI clients match
//! on that envelope, so the mapping is uniform here as well. Upstream detail
//! is logged, never forwarded to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::provider::Provider;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Required `message` field was empty or absent.
    #[error("Message is required")]
    EmptyMessage,

    /// No API key configured for the selected provider.
    #[error("{} API key not configured", .0.title())]
    MissingCredential(Provider),

    /// Provider returned a non-success HTTP status.
    #[error("{} API error: {status}", .provider.title())]
    Upstream { provider: Provider, status: u16 },

    /// The request never produced a usable response (connect, timeout, body
    /// read, JSON decode).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered 2xx but the envelope held no completion.
    #[error("malformed {0} response")]
    MalformedResponse(Provider),
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        error!("ai-chat request failed: {self}");

        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
