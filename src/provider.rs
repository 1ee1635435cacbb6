//! Provider selection and the per-provider wire formats.
//!
//! Each [`Provider`] variant owns its request builder and its response
//! extractor, so supporting a new vendor is a localized change: one variant,
//! one request shape, one extraction path.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::ProviderSettings;
use crate::conversation::{transcript, ChatTurn};
use crate::error::ChatError;

/// Fixed assistant persona sent with every request.
pub const SYSTEM_PROMPT: &str = "You are LearnEX AI, a helpful learning and career development assistant. You help users with:\n\
- Creating learning roadmaps and career guidance\n\
- Answering questions about skills and technologies\n\
- Providing study tips and learning strategies\n\
- General educational support\n\
\n\
Keep responses conversational, helpful, and focused on learning and development. Be encouraging and provide actionable advice when possible.";

/// Upstream LLM vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Multi-turn chat-completion endpoint (default).
    #[default]
    OpenAi,
    /// Single-prompt generation endpoint.
    Gemini,
}

impl Provider {
    /// Vendor name used in error messages.
    pub fn title(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Gemini",
        }
    }

    /// Completion endpoint for this provider.
    pub(crate) fn endpoint(self, settings: &ProviderSettings) -> String {
        match self {
            Provider::OpenAi => format!("{}/chat/completions", settings.api_base),
            Provider::Gemini => format!(
                "{}/models/{}:generateContent",
                settings.api_base, settings.model
            ),
        }
    }

    /// Builds the provider-specific request body.
    ///
    /// `history` must already be trimmed to the window; this function does
    /// not truncate.
    pub(crate) fn request_body(
        self,
        settings: &ProviderSettings,
        message: &str,
        history: &[ChatTurn],
    ) -> serde_json::Value {
        match self {
            Provider::OpenAi => {
                let mut messages = Vec::with_capacity(history.len() + 2);
                messages.push(Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                });
                messages.extend(history.iter().map(|t| Message {
                    role: t.role.wire_name().to_string(),
                    content: t.content.clone(),
                }));
                messages.push(Message {
                    role: "user".to_string(),
                    content: message.to_string(),
                });

                let request = ChatCompletionRequest {
                    model: settings.model.clone(),
                    messages,
                    temperature: settings.temperature,
                    max_tokens: settings.max_tokens,
                    stream: false,
                };
                json!(request)
            }
            Provider::Gemini => {
                let prompt = format!(
                    "{}\n\nPrevious conversation:\n{}\n\nCurrent user message: {}",
                    SYSTEM_PROMPT,
                    transcript(history),
                    message
                );

                let request = GenerateContentRequest {
                    contents: vec![Content {
                        parts: vec![Part { text: prompt }],
                    }],
                    generation_config: GenerationConfig {
                        temperature: settings.temperature,
                        max_output_tokens: settings.max_tokens,
                    },
                };
                json!(request)
            }
        }
    }

    /// Extracts the single completion text from a 2xx response envelope.
    pub(crate) fn extract_text(self, envelope: serde_json::Value) -> Result<String, ChatError> {
        match self {
            Provider::OpenAi => {
                let response: ChatCompletionResponse = serde_json::from_value(envelope)
                    .map_err(|_| ChatError::MalformedResponse(self))?;
                response
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .ok_or(ChatError::MalformedResponse(self))
            }
            Provider::Gemini => {
                let response: GenerateContentResponse = serde_json::from_value(envelope)
                    .map_err(|_| ChatError::MalformedResponse(self))?;
                response
                    .candidates
                    .into_iter()
                    .next()
                    .and_then(|c| c.content.parts.into_iter().next())
                    .map(|p| p.text)
                    .ok_or(ChatError::MalformedResponse(self))
            }
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "openai"),
            Provider::Gemini => write!(f, "gemini"),
        }
    }
}

// OpenAI wire shapes

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

// Gemini wire shapes

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;

    #[test]
    fn test_provider_serde() {
        assert_eq!(
            serde_json::from_str::<Provider>(r#""openai""#).unwrap(),
            Provider::OpenAi
        );
        assert_eq!(
            serde_json::from_str::<Provider>(r#""gemini""#).unwrap(),
            Provider::Gemini
        );
        assert_eq!(serde_json::to_string(&Provider::Gemini).unwrap(), r#""gemini""#);
        assert_eq!(Provider::default(), Provider::OpenAi);
    }

    #[test]
    fn test_openai_request_shape() {
        let config = ProxyConfig::default();
        let history = vec![
            ChatTurn::user("What is SQL?"),
            ChatTurn::assistant("A query language."),
        ];

        let body = Provider::OpenAi.request_body(&config.openai, "Tell me more", &history);
        let messages = body["messages"].as_array().unwrap();

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert!(messages[0]["content"]
            .as_str()
            .unwrap()
            .contains("LearnEX AI"));
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "What is SQL?");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3]["role"], "user");
        assert_eq!(messages[3]["content"], "Tell me more");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["stream"], false);
        assert_eq!(body["max_tokens"], 500);
    }

    #[test]
    fn test_gemini_request_shape() {
        let config = ProxyConfig::default();
        let history = vec![
            ChatTurn::user("What is SQL?"),
            ChatTurn::assistant("A query language."),
        ];

        let body = Provider::Gemini.request_body(&config.gemini, "Tell me more", &history);
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();

        assert!(text.contains("User: What is SQL?"));
        assert!(text.contains("Assistant: A query language."));
        assert!(text.ends_with("Current user message: Tell me more"));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 500);
    }

    #[test]
    fn test_gemini_endpoint_includes_model() {
        let config = ProxyConfig::default();
        let url = Provider::Gemini.endpoint(&config.gemini);
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_extract_openai_first_choice() {
        let envelope = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        });
        assert_eq!(Provider::OpenAi.extract_text(envelope).unwrap(), "first");
    }

    #[test]
    fn test_extract_gemini_first_part() {
        let envelope = serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "alpha"}, {"text": "beta"}]}}
            ]
        });
        assert_eq!(Provider::Gemini.extract_text(envelope).unwrap(), "alpha");
    }

    #[test]
    fn test_extract_rejects_empty_envelope() {
        let result = Provider::OpenAi.extract_text(serde_json::json!({"choices": []}));
        assert!(matches!(result, Err(ChatError::MalformedResponse(_))));

        let result = Provider::Gemini.extract_text(serde_json::json!({}));
        assert!(matches!(result, Err(ChatError::MalformedResponse(_))));
    }
}
