//! `GET /api/sessions/:session_id`: read-only session summary.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use stylist_ai::{Profile, TokenUsage};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub message_count: usize,
    pub profile: Profile,
    pub usage: TokenUsage,
    /// Usage per pipeline stage (`reply`, `extraction`).
    pub usage_by_stage: BTreeMap<&'static str, TokenUsage>,
    pub model_calls: u64,
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSummary>, ApiError> {
    let snapshot = state
        .store
        .snapshot(&session_id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("session not found: {session_id}")))?;

    Ok(Json(SessionSummary {
        session_id: snapshot.session_id,
        message_count: snapshot.messages.len(),
        profile: snapshot.profile,
        usage: snapshot.usage,
        usage_by_stage: snapshot.usage_by_stage,
        model_calls: snapshot.model_calls,
    }))
}
