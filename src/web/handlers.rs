use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;

use crate::openai::{CompletionClient, CompletionRequest, ReplyMessage};
use crate::web::models::{ChatRequest, GenerateFileRequest, GenerateFileResponse, Message, Role};

const MODEL: &str = "gpt-4";

const CHAT_MAX_TOKENS: u32 = 1000;
const CHAT_TEMPERATURE: f32 = 0.2;

const GENERATE_FILE_MAX_TOKENS: u32 = 1500;
const GENERATE_FILE_TEMPERATURE: f32 = 0.15;
const GENERATE_FILE_INSTRUCTION: &str = "You are a helpful assistant that returns only the \
    content of the requested file. Do not wrap code in explanation.";

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat API endpoint: forwards the caller's messages to the completion API
// and returns the first choice as the reply.
pub async fn chat(
    client: web::Data<dyn CompletionClient>,
    req: web::Json<ChatRequest>,
) -> impl Responder {
    // Only array-ness is validated; message contents pass through untouched.
    let messages = match req.into_inner().messages {
        Some(value) if value.is_array() => value,
        _ => {
            return HttpResponse::BadRequest().json(json!({ "error": "messages array required" }))
        }
    };

    info!(
        "Chat request with {} message(s)",
        messages.as_array().map(|m| m.len()).unwrap_or(0)
    );

    let request = CompletionRequest {
        model: MODEL.to_string(),
        messages,
        max_tokens: CHAT_MAX_TOKENS,
        temperature: CHAT_TEMPERATURE,
    };

    match client.complete(request).await {
        Ok(completion) => {
            let reply = completion
                .into_first_message()
                .unwrap_or_else(ReplyMessage::empty_assistant);
            HttpResponse::Ok().json(json!({ "reply": reply }))
        }
        Err(e) => {
            error!("OpenAI error: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": "OpenAI request failed",
                "details": e.to_string()
            }))
        }
    }
}

// Generate-file API endpoint: wraps the prompt in a fixed system instruction
// and returns the generated content alongside the requested filename.
pub async fn generate_file(
    client: web::Data<dyn CompletionClient>,
    req: web::Json<GenerateFileRequest>,
) -> impl Responder {
    let body = req.into_inner();
    let (filename, prompt) = match (body.filename, body.prompt) {
        (Some(filename), Some(prompt)) if !filename.is_empty() && !prompt.is_empty() => {
            (filename, prompt)
        }
        _ => {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "filename and prompt required" }))
        }
    };

    info!("Generate-file request for: {}", filename);

    let messages = vec![
        Message {
            role: Role::System,
            content: GENERATE_FILE_INSTRUCTION.to_string(),
        },
        Message {
            role: Role::User,
            content: prompt,
        },
    ];

    let request = CompletionRequest {
        model: MODEL.to_string(),
        messages: json!(messages),
        max_tokens: GENERATE_FILE_MAX_TOKENS,
        temperature: GENERATE_FILE_TEMPERATURE,
    };

    match client.complete(request).await {
        Ok(completion) => {
            let content = completion
                .into_first_message()
                .map(|m| m.content)
                .unwrap_or_default();
            HttpResponse::Ok().json(GenerateFileResponse { filename, content })
        }
        Err(e) => {
            error!("generate-file error: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": "generate-file failed",
                "details": e.to_string()
            }))
        }
    }
}
