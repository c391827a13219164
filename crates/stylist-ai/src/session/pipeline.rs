//! The per-turn pipeline: reply stage, then extraction stage.

use tracing::{debug, info, warn};

use crate::extractor::ProfileExtractor;
use crate::profile::merge;
use crate::{AiError, Message};

use super::prompt::reply_instruction;
use super::store::SessionStore;
use super::types::{Session, TurnError, TurnOutcome};

impl SessionStore {
    /// Run one turn for `session_id`.
    ///
    /// The turn works on a copy of the session and commits it only once a
    /// reply exists. A failed reply leaves the session exactly as it was.
    /// A failed extraction is logged and the reply is still committed.
    pub async fn respond(
        &self,
        session_id: &str,
        message: impl Into<String>,
    ) -> Result<TurnOutcome, TurnError> {
        let slot = self.slot(session_id).await;
        let mut session = slot.lock().await;

        let mut working = session.clone();
        working.messages.push(Message::user(message));

        let reply = match self.reply_stage(&mut working).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    session = %session_id,
                    error = %e,
                    unavailable = e.is_unavailable(),
                    "Reply generation failed, turn aborted"
                );
                let never_committed = session.messages.is_empty();
                drop(session);
                if never_committed {
                    self.discard_if_unused(session_id, &slot).await;
                }
                return Err(TurnError::Reply(e));
            }
        };

        let profile_updated = self.extraction_stage(session_id, &mut working).await;

        *session = working;
        info!(
            session = %session_id,
            messages = session.messages.len(),
            profile_updated,
            "Turn complete"
        );

        Ok(TurnOutcome {
            session_id: session_id.to_string(),
            reply,
            profile_updated,
        })
    }

    /// Generate the assistant reply from the full history and append it.
    async fn reply_stage(&self, working: &mut Session) -> Result<String, AiError> {
        let instruction = reply_instruction(&working.profile);
        let response = tokio::time::timeout(
            self.settings.reply_timeout,
            self.client.generate(&instruction, &working.messages),
        )
        .await
        .map_err(|_| AiError::Timeout)??;

        working.tracker.record("reply", &response.usage);
        working
            .messages
            .push(Message::assistant(response.content.clone()));
        Ok(response.content)
    }

    /// Extract from the trailing window and merge. Returns whether the
    /// profile changed; failures are logged and leave the profile as is.
    async fn extraction_stage(&self, session_id: &str, working: &mut Session) -> bool {
        let start = working
            .messages
            .len()
            .saturating_sub(self.settings.extraction_window);
        let recent = &working.messages[start..];

        let result = tokio::time::timeout(
            self.settings.extraction_timeout,
            ProfileExtractor::extract(self.client.as_ref(), recent),
        )
        .await
        .unwrap_or(Err(AiError::Timeout));

        match result {
            Ok((update, usage)) => {
                working.tracker.record("extraction", &usage);
                let merged = merge(&working.profile, &update);
                let changed = merged != working.profile;
                if changed {
                    debug!(session = %session_id, "Profile updated");
                }
                working.profile = merged;
                changed
            }
            Err(e) => {
                warn!(
                    session = %session_id,
                    error = %e,
                    unavailable = e.is_unavailable(),
                    "Profile extraction failed, keeping previous profile"
                );
                false
            }
        }
    }
}
