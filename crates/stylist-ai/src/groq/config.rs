//! Groq (OpenAI-compatible) client configuration.

use std::fmt;
use std::time::Duration;

use stylist_config::ModelSettings;

/// Groq API client configuration.
#[derive(Clone)]
pub struct GroqConfig {
    pub api_key: String,
    /// Base URL without trailing slash; `/chat/completions` is appended.
    pub base_url: String,
    pub chat_model: String,
    pub chat_temperature: f64,
    pub extraction_model: String,
    pub extraction_temperature: f64,
    pub max_tokens: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("chat_temperature", &self.chat_temperature)
            .field("extraction_model", &self.extraction_model)
            .field("extraction_temperature", &self.extraction_temperature)
            .field("max_tokens", &self.max_tokens)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl GroqConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_settings(&ModelSettings::default(), api_key)
    }

    pub fn from_settings(settings: &ModelSettings, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            chat_model: settings.chat_model.clone(),
            chat_temperature: settings.chat_temperature,
            extraction_model: settings.extraction_model.clone(),
            extraction_temperature: settings.extraction_temperature,
            max_tokens: settings.max_tokens,
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
