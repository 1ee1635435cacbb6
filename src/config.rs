//! Proxy configuration.
//!
//! Credentials are resolved from the process environment exactly once, in
//! [`ProxyConfig::from_env`]; everything downstream receives the resulting
//! value and never reads ambient state.

use crate::provider::Provider;

/// Settings for one upstream provider.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Base URL of the provider API.
    pub api_base: String,
    /// Server-held credential. `None` means the provider is unavailable.
    pub api_key: Option<String>,
    /// Model identifier sent upstream.
    pub model: String,
    /// Completion length cap.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Full proxy configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub openai: ProviderSettings,
    pub gemini: ProviderSettings,
    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            openai: ProviderSettings {
                api_base: "https://api.openai.com/v1".to_string(),
                api_key: None,
                model: "gpt-4o-mini".to_string(),
                max_tokens: 500,
                temperature: 0.7,
            },
            gemini: ProviderSettings {
                api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                api_key: None,
                model: "gemini-1.5-flash-latest".to_string(),
                max_tokens: 500,
                temperature: 0.7,
            },
            timeout_secs: 60,
        }
    }
}

impl ProxyConfig {
    /// Reads credentials and endpoint overrides from the process environment.
    ///
    /// `OPENAI_API_KEY` / `GEMINI_API_KEY` supply credentials;
    /// `OPENAI_API_BASE` / `GEMINI_API_BASE` override the endpoints so tests
    /// and self-hosted gateways can redirect traffic.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.openai.api_key = env_non_empty("OPENAI_API_KEY");
        config.gemini.api_key = env_non_empty("GEMINI_API_KEY");

        if let Some(base) = env_non_empty("OPENAI_API_BASE") {
            config.openai.api_base = base;
        }
        if let Some(base) = env_non_empty("GEMINI_API_BASE") {
            config.gemini.api_base = base;
        }

        config
    }

    /// Settings for the selected provider.
    pub fn provider(&self, provider: Provider) -> &ProviderSettings {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::Gemini => &self.gemini,
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
