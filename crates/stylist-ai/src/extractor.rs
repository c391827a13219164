//! Profile extraction from a short window of recent turns.

use tracing::debug;

use crate::profile::PartialProfile;
use crate::{AiClient, AiError, Message, TokenUsage};

/// Fixed instruction for the extraction call.
pub const EXTRACTION_INSTRUCTION: &str = "You extract fashion preferences from a conversation \
between a user and a fashion assistant. Fill in only what the user stated or clearly implied \
in these messages: their name, budget tier (low, medium or high), style keywords, clothing \
types they like, and colors they prefer. Leave a field empty if nothing new is mentioned.";

/// Turns a window of messages into a [`PartialProfile`].
///
/// Stateless: every call is independent, with no retries and no caching.
pub struct ProfileExtractor;

impl ProfileExtractor {
    /// Run structured extraction over `recent`.
    ///
    /// Payloads that do not deserialize as [`PartialProfile`] are reported
    /// as [`AiError::SchemaViolation`].
    pub async fn extract(
        client: &dyn AiClient,
        recent: &[Message],
    ) -> Result<(PartialProfile, TokenUsage), AiError> {
        let schema = PartialProfile::output_schema();
        let response = client
            .extract_structured(EXTRACTION_INSTRUCTION, recent, &schema)
            .await?;

        let update: PartialProfile = serde_json::from_value(response.value)
            .map_err(|e| AiError::SchemaViolation(e.to_string()))?;

        debug!(empty = update.is_empty(), "Profile extraction finished");
        Ok((update, response.usage))
    }
}
