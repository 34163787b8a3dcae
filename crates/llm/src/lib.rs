//! Chat-completion client for an OpenAI-compatible LLM API.

pub mod client;

pub use client::{LlmClient, LlmConfig, LlmError, MUSIC_ASSISTANT_PROMPT};
