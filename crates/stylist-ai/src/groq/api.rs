//! AiClient trait implementation for GroqClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiClient, AiError, AiResponse, Message, OutputSchema, StructuredResponse};

use super::client::GroqClient;

impl GroqClient {
    /// POST a body to `/chat/completions` and return the decoded JSON.
    async fn post_completion(&self, body: &serde_json::Value) -> Result<serde_json::Value, AiError> {
        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl AiClient for GroqClient {
    async fn generate(
        &self,
        system_instruction: &str,
        messages: &[Message],
    ) -> Result<AiResponse, AiError> {
        let body = self.build_generate_body(system_instruction, messages);

        debug!(model = %self.config.chat_model, messages = messages.len(), "Groq chat request");

        let json = self.post_completion(&body).await?;
        self.parse_generate_response(json)
    }

    async fn extract_structured(
        &self,
        system_instruction: &str,
        messages: &[Message],
        schema: &OutputSchema,
    ) -> Result<StructuredResponse, AiError> {
        let body = self.build_extract_body(system_instruction, messages, schema);

        debug!(
            model = %self.config.extraction_model,
            schema = %schema.name,
            "Groq structured extraction request"
        );

        let json = self.post_completion(&body).await?;
        self.parse_extract_response(json, schema)
    }
}
