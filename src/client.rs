//! Outbound LLM calls.
//!
//! One [`LlmClient`] is shared across all requests; it holds no mutable
//! state, so concurrent invocations do not interact.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error};

use crate::config::ProxyConfig;
use crate::conversation::{window, ChatTurn, HISTORY_WINDOW};
use crate::error::ChatError;
use crate::provider::Provider;

pub struct LlmClient {
    http: Client,
    config: ProxyConfig,
}

impl LlmClient {
    pub fn new(config: ProxyConfig) -> Result<Self, ChatError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Obtains one completion from the selected provider.
    ///
    /// History beyond the last [`HISTORY_WINDOW`] turns is dropped before
    /// the request is built. Fails before any network I/O when the selected
    /// provider's credential is missing. No retries.
    pub async fn complete(
        &self,
        provider: Provider,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<String, ChatError> {
        let settings = self.config.provider(provider);
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or(ChatError::MissingCredential(provider))?;

        let recent = window(history, HISTORY_WINDOW);
        let body = provider.request_body(settings, message, recent);

        debug!(%provider, turns = recent.len(), "forwarding chat message upstream");

        let request = self.http.post(provider.endpoint(settings)).json(&body);
        let request = match provider {
            Provider::OpenAi => request.bearer_auth(api_key),
            Provider::Gemini => request.query(&[("key", api_key)]),
        };

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(%provider, %status, %detail, "upstream returned an error");
            return Err(ChatError::Upstream {
                provider,
                status: status.as_u16(),
            });
        }

        let envelope: serde_json::Value = response.json().await?;
        provider.extract_text(envelope)
    }
}
