//! Groq API client struct, request building, and response parsing.

use crate::{AiError, AiResponse, Message, OutputSchema, StructuredResponse, TokenUsage};

use super::config::GroqConfig;

/// Groq API client.
pub struct GroqClient {
    pub(crate) config: GroqConfig,
    pub(crate) http: reqwest::Client,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// System instruction first, then the conversation in order.
    fn chat_messages(system_instruction: &str, messages: &[Message]) -> Vec<serde_json::Value> {
        let mut msgs = Vec::with_capacity(messages.len() + 1);
        msgs.push(serde_json::json!({
            "role": "system",
            "content": system_instruction,
        }));
        for msg in messages {
            msgs.push(serde_json::json!({
                "role": msg.role.as_str(),
                "content": msg.content,
            }));
        }
        msgs
    }

    pub(crate) fn build_generate_body(
        &self,
        system_instruction: &str,
        messages: &[Message],
    ) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.chat_model,
            "temperature": self.config.chat_temperature,
            "max_tokens": self.config.max_tokens,
            "messages": Self::chat_messages(system_instruction, messages),
        })
    }

    /// Structured output is requested as a single forced function call
    /// whose parameters are the target schema.
    pub(crate) fn build_extract_body(
        &self,
        system_instruction: &str,
        messages: &[Message],
        schema: &OutputSchema,
    ) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.extraction_model,
            "temperature": self.config.extraction_temperature,
            "max_tokens": self.config.max_tokens,
            "messages": Self::chat_messages(system_instruction, messages),
            "tools": [{
                "type": "function",
                "function": {
                    "name": schema.name,
                    "description": schema.description,
                    "parameters": schema.schema,
                }
            }],
            "tool_choice": {
                "type": "function",
                "function": { "name": schema.name }
            },
        })
    }

    pub(crate) fn parse_generate_response(
        &self,
        json: serde_json::Value,
    ) -> Result<AiResponse, AiError> {
        let message = first_choice_message(&json)?;
        let content = message["content"]
            .as_str()
            .ok_or_else(|| AiError::ParseError("choice has no text content".into()))?
            .to_string();

        Ok(AiResponse {
            content,
            usage: parse_usage(&json),
        })
    }

    pub(crate) fn parse_extract_response(
        &self,
        json: serde_json::Value,
        schema: &OutputSchema,
    ) -> Result<StructuredResponse, AiError> {
        let message = first_choice_message(&json)?;
        let call = message["tool_calls"]
            .as_array()
            .and_then(|calls| {
                calls
                    .iter()
                    .find(|c| c["function"]["name"] == schema.name.as_str())
                    .or_else(|| calls.first())
            })
            .ok_or_else(|| {
                AiError::SchemaViolation(format!("no `{}` function call in response", schema.name))
            })?;

        // Arguments arrive as a JSON-encoded string; some providers inline the object.
        let arguments = &call["function"]["arguments"];
        let value = match arguments {
            serde_json::Value::String(raw) => serde_json::from_str(raw)
                .map_err(|e| AiError::SchemaViolation(format!("invalid arguments JSON: {e}")))?,
            serde_json::Value::Object(_) => arguments.clone(),
            _ => {
                return Err(AiError::SchemaViolation(
                    "function call has no arguments".into(),
                ))
            }
        };

        Ok(StructuredResponse {
            value,
            usage: parse_usage(&json),
        })
    }
}

fn first_choice_message(json: &serde_json::Value) -> Result<&serde_json::Value, AiError> {
    json["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .map(|choice| &choice["message"])
        .ok_or_else(|| AiError::ParseError("no choices in response".into()))
}

fn parse_usage(json: &serde_json::Value) -> TokenUsage {
    TokenUsage {
        input_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
        output_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PartialProfile;

    fn client() -> GroqClient {
        GroqClient::new(GroqConfig::new("test-key")).unwrap()
    }

    #[test]
    fn generate_body_puts_system_first() {
        let body = client().build_generate_body(
            "be helpful",
            &[Message::user("hi"), Message::assistant("hello")],
        );
        let msgs = body["messages"].as_array().unwrap();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[0]["role"], "system");
        assert_eq!(msgs[0]["content"], "be helpful");
        assert_eq!(msgs[1]["role"], "user");
        assert_eq!(msgs[2]["role"], "assistant");
        assert_eq!(body["model"], "llama-3.1-8b-instant");
        assert_eq!(body["temperature"], 0.7);
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn extract_body_forces_function_call() {
        let schema = PartialProfile::output_schema();
        let body = client().build_extract_body("extract", &[Message::user("red")], &schema);
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "UserProfile");
        assert_eq!(body["tool_choice"]["function"]["name"], "UserProfile");
        assert_eq!(body["temperature"], 0.3);
        assert_eq!(
            body["tools"][0]["function"]["parameters"]["properties"]["colors"]["type"],
            "array"
        );
    }

    #[test]
    fn parse_generate_reads_content_and_usage() {
        let json = serde_json::json!({
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Try a camel coat." },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
        });
        let response = client().parse_generate_response(json).unwrap();
        assert_eq!(response.content, "Try a camel coat.");
        assert_eq!(response.usage.input_tokens, 42);
        assert_eq!(response.usage.output_tokens, 7);
    }

    #[test]
    fn parse_generate_without_choices_is_parse_error() {
        let err = client()
            .parse_generate_response(serde_json::json!({ "choices": [] }))
            .unwrap_err();
        assert!(matches!(err, AiError::ParseError(_)));
    }

    #[test]
    fn parse_extract_decodes_string_arguments() {
        let schema = PartialProfile::output_schema();
        let json = serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "UserProfile",
                            "arguments": "{\"name\":\"Sam\",\"colors\":[\"red\"]}"
                        }
                    }]
                }
            }],
            "usage": { "prompt_tokens": 30, "completion_tokens": 12 }
        });
        let response = client().parse_extract_response(json, &schema).unwrap();
        assert_eq!(response.value["name"], "Sam");
        assert_eq!(response.value["colors"][0], "red");
        assert_eq!(response.usage.output_tokens, 12);
    }

    #[test]
    fn parse_extract_accepts_inline_object_arguments() {
        let schema = PartialProfile::output_schema();
        let json = serde_json::json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "function": { "name": "UserProfile", "arguments": { "budget_tier": "low" } }
                    }]
                }
            }]
        });
        let response = client().parse_extract_response(json, &schema).unwrap();
        assert_eq!(response.value["budget_tier"], "low");
    }

    #[test]
    fn parse_extract_without_tool_call_is_schema_violation() {
        let schema = PartialProfile::output_schema();
        let json = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "Sure!" } }]
        });
        let err = client().parse_extract_response(json, &schema).unwrap_err();
        assert!(matches!(err, AiError::SchemaViolation(_)));
    }

    #[test]
    fn parse_extract_with_garbled_arguments_is_schema_violation() {
        let schema = PartialProfile::output_schema();
        let json = serde_json::json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "function": { "name": "UserProfile", "arguments": "{not json" }
                    }]
                }
            }]
        });
        let err = client().parse_extract_response(json, &schema).unwrap_err();
        assert!(matches!(err, AiError::SchemaViolation(_)));
    }
}
