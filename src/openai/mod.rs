use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;

/// Failure of a call to the completion API. Handlers surface the display
/// string as the `details` field of the error response.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to completion API failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("completion API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Payload for one chat-completion call. `messages` is kept as raw JSON so
/// caller-supplied message arrays pass through unmodified.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Value,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ReplyMessage {
    /// Fallback reply used when the upstream response carries no message.
    pub fn empty_assistant() -> Self {
        Self {
            role: "assistant".to_string(),
            content: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ReplyMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl CompletionResponse {
    /// Message of the first choice, if the upstream returned any.
    pub fn into_first_message(self) -> Option<ReplyMessage> {
        self.choices.into_iter().next().and_then(|c| c.message)
    }
}

/// Capability interface for the upstream provider, so the handlers can be
/// exercised in tests without network access.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, UpstreamError>;
}

/// reqwest-backed client for the OpenAI chat-completion endpoint.
pub struct OpenAiClient {
    api_base: String,
    api_key: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        info!("Using completion API at: {}", config.api_base);
        Self {
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, UpstreamError> {
        let url = format!("{}/v1/chat/completions", self.api_base);

        info!(
            "Sending completion request: model={} max_tokens={}",
            request.model, request.max_tokens
        );
        debug!(
            "Payload: {}",
            serde_json::to_string(&request).unwrap_or_default()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        debug!("Upstream returned {} choice(s)", completion.choices.len());
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_parsing_tolerates_extra_and_missing_fields() {
        let full: CompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": "hi" },
                    "finish_reason": "stop"
                }
            ],
            "usage": { "prompt_tokens": 5, "completion_tokens": 1 }
        }))
        .unwrap();
        let reply = full.into_first_message().unwrap();
        assert_eq!(reply.role, "assistant");
        assert_eq!(reply.content, "hi");

        let empty: CompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.into_first_message().is_none());

        let bare_choice: CompletionResponse =
            serde_json::from_value(json!({ "choices": [{}] })).unwrap();
        assert!(bare_choice.into_first_message().is_none());
    }

    #[test]
    fn request_serializes_fixed_parameters() {
        let request = CompletionRequest {
            model: "gpt-4".to_string(),
            messages: json!([{ "role": "user", "content": "hello" }]),
            max_tokens: 1000,
            temperature: 0.2,
        };
        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(payload["model"], "gpt-4");
        assert_eq!(payload["max_tokens"], 1000);
        assert_eq!(payload["messages"][0]["content"], "hello");
    }
}
