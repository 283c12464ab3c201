//! Language-model boundary.
//!
//! Everything that talks to the model goes through [`LanguageModel`], so
//! the chat service and the recommender can be exercised with scripted
//! implementations in tests. The production implementation targets the
//! Anthropic Messages API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AdvisorConfig;

use super::domain::Turn;

/// Maximum output tokens for a conversational reply.
pub(crate) const CHAT_MAX_TOKENS: u32 = 1024;

/// Assistant reply with provenance and usage counters.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Errors crossing the model boundary.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("model endpoint misconfigured: {0}")]
    Configuration(String),
    #[error("model request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("model API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed model reply: {0}")]
    InvalidResponse(String),
}

/// Seam for the external chat/completion endpoints.
///
/// Calls block until the remote endpoint answers or the configured
/// client timeout fires; retry and cancellation belong to the caller.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Multi-turn chat with a system instruction.
    async fn chat(&self, system: &str, turns: &[Turn]) -> Result<ChatReply, LlmError>;

    /// Single free-text completion with a small output budget.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError>;

    /// Model identifier for response payloads.
    fn model_name(&self) -> &str;
}

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client.
pub struct AnthropicModel {
    client: Client,
    config: AdvisorConfig,
}

impl AnthropicModel {
    pub fn new(config: AdvisorConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| LlmError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Configuration("ADVISOR_API_KEY is not set".to_string()))
    }

    async fn send(&self, request: &MessagesRequest<'_>) -> Result<MessagesResponse, LlmError> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.endpoint))
            .header("x-api-key", self.api_key()?)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        response
            .json()
            .await
            .map_err(|err| LlmError::InvalidResponse(err.to_string()))
    }
}

#[async_trait]
impl LanguageModel for AnthropicModel {
    async fn chat(&self, system: &str, turns: &[Turn]) -> Result<ChatReply, LlmError> {
        let messages: Vec<WireMessage> = turns.iter().map(WireMessage::from).collect();
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: CHAT_MAX_TOKENS,
            system: Some(system),
            messages,
        };

        let response = self.send(&request).await?;
        let text = response.reply_text()?;

        Ok(ChatReply {
            text,
            model: response.model,
            input_tokens: response.usage.input_tokens,
            output_tokens: response.usage.output_tokens,
        })
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens,
            system: None,
            messages: vec![WireMessage {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let response = self.send(&request).await?;
        response.reply_text()
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Messages API wire types.

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&Turn> for WireMessage {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.as_str(),
            content: turn.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    usage: Usage,
}

impl MessagesResponse {
    fn reply_text(&self) -> Result<String, LlmError> {
        self.content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.clone())
            .ok_or_else(|| LlmError::InvalidResponse("reply carried no text block".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::domain::TurnRole;

    #[test]
    fn wire_message_carries_role_and_content() {
        let turn = Turn::user("Hello");
        let message = WireMessage::from(&turn);
        assert_eq!(message.role, TurnRole::User.as_str());
        assert_eq!(message.content, "Hello");
    }

    #[test]
    fn reply_text_skips_non_text_blocks() {
        let response = MessagesResponse {
            content: vec![
                ContentBlock {
                    kind: "tool_use".to_string(),
                    text: String::new(),
                },
                ContentBlock {
                    kind: "text".to_string(),
                    text: "PRODUCT: fintech".to_string(),
                },
            ],
            model: "claude-3-5-sonnet-20241022".to_string(),
            usage: Usage::default(),
        };

        assert_eq!(response.reply_text().expect("text block"), "PRODUCT: fintech");
    }

    #[test]
    fn reply_text_rejects_empty_content() {
        let response = MessagesResponse {
            content: Vec::new(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            usage: Usage::default(),
        };

        assert!(matches!(
            response.reply_text(),
            Err(LlmError::InvalidResponse(_))
        ));
    }
}
