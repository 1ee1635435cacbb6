//! HTTP surface of the chat proxy.
//!
//! One POST route per chat turn plus a health check. Cross-origin requests
//! are allowed from any origin with the fixed header set the LearnEX UI
//! sends; preflight OPTIONS always answers 200 with an empty body.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{self, HeaderName};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::LlmClient;
use crate::config::ProxyConfig;
use crate::conversation::ChatTurn;
use crate::error::ChatError;
use crate::provider::Provider;

/// Inbound chat request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// An absent message behaves like an empty one and is rejected in the
    /// handler, keeping the error inside the standard envelope.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
    #[serde(default, rename = "model")]
    pub provider: Provider,
}

/// Normalized reply envelope, created fresh per call and never persisted.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub timestamp: DateTime<Utc>,
    pub model: Provider,
}

/// POST /ai-chat - forward one chat turn to the selected provider.
pub async fn chat(
    State(client): State<Arc<LlmClient>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ChatError> {
    if request.message.is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    info!(
        provider = %request.provider,
        turns = request.conversation_history.len(),
        "processing chat message"
    );

    let text = client
        .complete(
            request.provider,
            &request.message,
            &request.conversation_history,
        )
        .await?;

    Ok(Json(ChatReply {
        response: text,
        timestamp: Utc::now(),
        model: request.provider,
    }))
}

/// Bare OPTIONS requests bypass the CORS layer's preflight handling, so the
/// route answers them explicitly; the layer still attaches the headers.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Builds the router with CORS and request tracing applied.
pub fn build_router(client: Arc<LlmClient>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/health", get(health_check))
        .route("/ai-chat", post(chat).options(preflight))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(client)
}

pub async fn run_server(config: ProxyConfig, host: &str, port: u16) -> anyhow::Result<()> {
    let client = Arc::new(LlmClient::new(config)?);
    let app = build_router(client);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("LearnEX chat proxy listening on {}", addr);
    info!("  POST /ai-chat - chat completion proxy");
    info!("  GET  /health  - health check");

    axum::serve(listener, app).await?;

    Ok(())
}
