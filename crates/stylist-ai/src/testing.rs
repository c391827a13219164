//! Scripted in-memory `AiClient` for tests.
//!
//! Queued results are returned in order; once a queue runs dry,
//! `generate` echoes the last user message and `extract_structured`
//! returns an empty object.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::{AiClient, AiError, AiResponse, Message, OutputSchema, StructuredResponse, TokenUsage};

/// One recorded capability call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub messages: Vec<Message>,
}

#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    extractions: Mutex<VecDeque<Result<serde_json::Value, AiError>>>,
    generate_calls: Mutex<Vec<RecordedCall>>,
    extraction_calls: Mutex<Vec<RecordedCall>>,
    generate_delay: Option<Duration>,
    extraction_delay: Option<Duration>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every `generate` call.
    pub fn with_generate_delay(mut self, delay: Duration) -> Self {
        self.generate_delay = Some(delay);
        self
    }

    /// Sleep this long inside every `extract_structured` call.
    pub fn with_extraction_delay(mut self, delay: Duration) -> Self {
        self.extraction_delay = Some(delay);
        self
    }

    pub fn push_reply(&self, reply: Result<&str, AiError>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(reply.map(str::to_string));
    }

    pub fn push_extraction(&self, value: Result<serde_json::Value, AiError>) {
        self.extractions.lock().unwrap().push_back(value);
    }

    pub fn generate_calls(&self) -> Vec<RecordedCall> {
        self.generate_calls.lock().unwrap().clone()
    }

    pub fn extraction_calls(&self) -> Vec<RecordedCall> {
        self.extraction_calls.lock().unwrap().clone()
    }
}

fn usage() -> TokenUsage {
    TokenUsage {
        input_tokens: 10,
        output_tokens: 5,
    }
}

#[async_trait]
impl AiClient for ScriptedClient {
    async fn generate(
        &self,
        system_instruction: &str,
        messages: &[Message],
    ) -> Result<AiResponse, AiError> {
        self.generate_calls.lock().unwrap().push(RecordedCall {
            system: system_instruction.to_string(),
            messages: messages.to_vec(),
        });
        if let Some(delay) = self.generate_delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.replies.lock().unwrap().pop_front();
        let content = match scripted {
            Some(result) => result?,
            None => {
                let last = messages
                    .iter()
                    .rev()
                    .find(|m| m.role == crate::Role::User)
                    .map(|m| m.content.as_str())
                    .unwrap_or_default();
                format!("reply to: {last}")
            }
        };

        Ok(AiResponse {
            content,
            usage: usage(),
        })
    }

    async fn extract_structured(
        &self,
        system_instruction: &str,
        messages: &[Message],
        _schema: &OutputSchema,
    ) -> Result<StructuredResponse, AiError> {
        self.extraction_calls.lock().unwrap().push(RecordedCall {
            system: system_instruction.to_string(),
            messages: messages.to_vec(),
        });
        if let Some(delay) = self.extraction_delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.extractions.lock().unwrap().pop_front();
        let value = match scripted {
            Some(result) => result?,
            None => serde_json::json!({}),
        };

        Ok(StructuredResponse {
            value,
            usage: usage(),
        })
    }
}
