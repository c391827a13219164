use serde::{Deserialize, Serialize};

/// Conversation pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    /// How many trailing messages the profile extractor sees (valid range: 1-20).
    pub extraction_window: usize,
    /// Deadline for the reply-generation call (valid range: 1-600).
    pub reply_timeout_secs: u64,
    /// Deadline for the extraction call (valid range: 1-600).
    pub extraction_timeout_secs: u64,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            extraction_window: 3,
            reply_timeout_secs: 60,
            extraction_timeout_secs: 30,
        }
    }
}
