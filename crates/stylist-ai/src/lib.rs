//! Conversation engine for the stylist backend.
//!
//! Provides:
//! - The `AiClient` capability contract (free-form generation and
//!   schema-constrained extraction)
//! - A Groq / OpenAI-compatible client implementing it
//! - The typed user `Profile` and its merge rule
//! - `ProfileExtractor`, which turns recent turns into a profile update
//! - `SessionStore`, which owns per-session state and runs the
//!   reply-then-extract pipeline with per-session serialization

pub mod extractor;
pub mod groq;
pub mod profile;
pub mod session;
pub mod token_tracker;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use async_trait::async_trait;

pub use extractor::ProfileExtractor;
pub use groq::{GroqClient, GroqConfig};
pub use profile::{merge, PartialProfile, Profile};
pub use session::{PipelineSettings, SessionSnapshot, SessionStore, TurnError, TurnOutcome};
pub use token_tracker::TokenTracker;

/// Remote language-model capability.
///
/// Both calls are single request/response exchanges with no session
/// affinity of their own; conversation state lives in [`SessionStore`].
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Free-form chat completion.
    async fn generate(
        &self,
        system_instruction: &str,
        messages: &[Message],
    ) -> Result<AiResponse, AiError>;

    /// Completion constrained to `schema`. A reply that does not carry a
    /// JSON payload is an [`AiError::SchemaViolation`].
    async fn extract_structured(
        &self,
        system_instruction: &str,
        messages: &[Message],
        schema: &OutputSchema,
    ) -> Result<StructuredResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// Named JSON schema handed to [`AiClient::extract_structured`].
#[derive(Debug, Clone)]
pub struct OutputSchema {
    pub name: String,
    pub description: String,
    pub schema: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone)]
pub struct StructuredResponse {
    pub value: serde_json::Value,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
    #[error("Timeout")]
    Timeout,
}

impl AiError {
    /// Whether the capability could not be reached or did not answer in time.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            AiError::ApiError(_) | AiError::RateLimited | AiError::NetworkError(_) | AiError::Timeout
        )
    }
}
