use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ChatMessage, ChatRole};
use crate::services::schema::SchemaViolation;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,
    #[error("request to LLM provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("LLM provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode LLM provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("LLM provider returned no choices")]
    EmptyChoices,
    #[error("LLM refused to answer: {0}")]
    Refusal(String),
    #[error("LLM provider returned empty content")]
    EmptyContent,
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

impl From<&ChatMessage> for PromptMessage {
    fn from(message: &ChatMessage) -> Self {
        let role = match message.role {
            ChatRole::User => PromptRole::User,
            ChatRole::Assistant => PromptRole::Assistant,
        };
        Self {
            role,
            content: message.content.clone(),
        }
    }
}

/// OpenAI-style `response_format` for structured completions.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonSchema { json_schema: JsonSchemaFormat },
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

/// The two things this service needs from an LLM provider.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Free-text chat completion; returns the assistant's reply.
    async fn complete_chat(&self, messages: &[PromptMessage]) -> Result<String, LlmError>;

    /// Completion constrained to `format`; returns the parsed JSON payload.
    async fn complete_structured(
        &self,
        messages: &[PromptMessage],
        format: &ResponseFormat,
    ) -> Result<Value, LlmError>;

    fn provider_name(&self) -> &str;
}
