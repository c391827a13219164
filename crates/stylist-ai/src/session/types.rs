//! Session state, pipeline settings, and turn results.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use stylist_config::ProfileSettings;

use crate::profile::Profile;
use crate::token_tracker::TokenTracker;
use crate::{AiError, Message, TokenUsage};

/// Server-side state for one conversation.
#[derive(Debug, Clone, Default)]
pub(crate) struct Session {
    /// Conversation history in arrival order.
    pub(crate) messages: Vec<Message>,
    /// Preferences learned so far.
    pub(crate) profile: Profile,
    /// Token usage across this session's capability calls.
    pub(crate) tracker: TokenTracker,
}

/// Pipeline knobs: extraction window and per-call deadlines.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub extraction_window: usize,
    pub reply_timeout: Duration,
    pub extraction_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&ProfileSettings::default())
    }
}

impl From<&ProfileSettings> for PipelineSettings {
    fn from(settings: &ProfileSettings) -> Self {
        Self {
            extraction_window: settings.extraction_window.max(1),
            reply_timeout: Duration::from_secs(settings.reply_timeout_secs),
            extraction_timeout: Duration::from_secs(settings.extraction_timeout_secs),
        }
    }
}

/// Result of a successful turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session_id: String,
    pub reply: String,
    /// Whether the extraction stage changed the profile.
    pub profile_updated: bool,
}

/// A turn that produced no reply. Nothing was committed to the session.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("reply generation failed: {0}")]
    Reply(#[source] AiError),
}

/// Read-only copy of a session, taken between turns.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub messages: Vec<Message>,
    pub profile: Profile,
    pub usage: TokenUsage,
    pub usage_by_stage: BTreeMap<&'static str, TokenUsage>,
    pub model_calls: u64,
}
