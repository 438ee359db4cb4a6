use anyhow::{anyhow, Result};
use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_BASE: &str = "https://api.openai.com";

/// Process configuration, built once at startup and injected into the
/// request handlers. Nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub port: u16,
    pub api_base: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("Missing OPENAI_API_KEY in environment. See .env.example"))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow!("PORT must be a number, got: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let api_base = env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            port,
            api_base,
        })
    }
}
