use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound chat body. `messages` stays raw JSON: the handlers only check
/// that it is an array and forward it as-is, so callers are free to send
/// whatever message shapes the upstream accepts.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateFileRequest {
    pub filename: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateFileResponse {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

/// Message shape used for conversations the service constructs itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}
