//! Session store: maps caller-supplied ids to conversation state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::AiClient;

use super::types::{PipelineSettings, Session, SessionSnapshot};

/// Shared handle to one session. The mutex is held for a whole turn.
pub(crate) type SessionSlot = Arc<Mutex<Session>>;

/// Thread-safe session store and turn driver.
///
/// Turns on the same id run one at a time: each holds that session's
/// mutex from the first read to the final commit. The map lock itself is
/// only held long enough to look up or insert a slot, so turns on
/// different ids never wait on each other. Sessions live until the
/// process exits.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionSlot>>>,
    pub(crate) client: Arc<dyn AiClient>,
    pub(crate) settings: PipelineSettings,
}

impl SessionStore {
    pub fn new(client: Arc<dyn AiClient>, settings: PipelineSettings) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            client,
            settings,
        }
    }

    /// Get the slot for `session_id`, creating an empty session on first use.
    pub(crate) async fn slot(&self, session_id: &str) -> SessionSlot {
        if let Some(slot) = self.sessions.read().await.get(session_id) {
            return Arc::clone(slot);
        }

        let mut map = self.sessions.write().await;
        let slot = map.entry(session_id.to_string()).or_insert_with(|| {
            tracing::debug!(session = %session_id, "Creating session");
            Arc::new(Mutex::new(Session::default()))
        });
        Arc::clone(slot)
    }

    /// Drop a slot that a failed first turn created.
    ///
    /// Only removes the entry when it is still the same slot, nobody but
    /// the map and the caller holds it, and it has no history.
    pub(crate) async fn discard_if_unused(&self, session_id: &str, slot: &SessionSlot) {
        let mut map = self.sessions.write().await;
        let same_slot = map
            .get(session_id)
            .is_some_and(|current| Arc::ptr_eq(current, slot));
        if !same_slot || Arc::strong_count(slot) != 2 {
            return;
        }
        if slot.try_lock().is_ok_and(|session| session.messages.is_empty()) {
            map.remove(session_id);
            tracing::debug!(session = %session_id, "Discarded session after failed first turn");
        }
    }

    /// Copy of a session's state. Waits for an in-flight turn on that id.
    /// Unknown ids return `None` and are not created.
    pub async fn snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        let slot = self.sessions.read().await.get(session_id).cloned()?;
        let session = slot.lock().await;
        Some(SessionSnapshot {
            session_id: session_id.to_string(),
            messages: session.messages.clone(),
            profile: session.profile.clone(),
            usage: *session.tracker.total(),
            usage_by_stage: session.tracker.by_stage().clone(),
            model_calls: session.tracker.call_count(),
        })
    }

    /// Check if a session exists.
    pub async fn exists(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    /// Number of sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
