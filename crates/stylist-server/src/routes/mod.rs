mod chat;
mod sessions;

use axum::extract::State;
use axum::Json;

use crate::AppState;

pub use chat::{chat, ChatRequest, ChatResponse};
pub use sessions::{get_session, SessionSummary};

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "sessions": state.store.count().await,
    }))
}

#[cfg(test)]
mod tests;
