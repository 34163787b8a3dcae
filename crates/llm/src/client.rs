//! REST client for the `/chat/completions` endpoint.
//!
//! Sends one system instruction plus one user message and returns the first
//! choice's text unmodified.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// System instruction for free-form music questions.
pub const MUSIC_ASSISTANT_PROMPT: &str = "You are a friendly music assistant for a record store \
catalogue. Answer questions about artists, albums, genres and music history concisely. If a \
question is not about music, say briefly that you can only help with music.";

/// Connection settings for the completion API.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL up to and including the version segment, e.g.
    /// `https://api.openai.com/v1`.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
}

/// Errors from the completion API.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("LLM API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The API answered 2xx but without any completion text.
    #[error("LLM returned no completion")]
    EmptyCompletion,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Run one completion and return the assistant's text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyCompletion)?;

        tracing::debug!(model = %self.config.model, chars = text.len(), "LLM completion received");
        Ok(text)
    }
}
