use serde::{Deserialize, Serialize};

/// Hosted language-model settings (OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    pub chat_model: String,
    /// Valid range: 0.0-2.0.
    pub chat_temperature: f64,
    pub extraction_model: String,
    /// Valid range: 0.0-2.0.
    pub extraction_temperature: f64,
    /// Valid range: 16-32768.
    pub max_tokens: u32,
    /// Valid range: 1-120.
    pub connect_timeout_secs: u64,
    /// Valid range: 1-600.
    pub request_timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".into(),
            chat_model: "llama-3.1-8b-instant".into(),
            chat_temperature: 0.7,
            extraction_model: "llama-3.1-8b-instant".into(),
            extraction_temperature: 0.3,
            max_tokens: 1024,
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
        }
    }
}
