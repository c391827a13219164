//! `POST /api/chat`: one conversation turn.

use axum::async_trait;
use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Unique id for the conversation.
    pub session_id: String,
    /// The user's message.
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub answer: String,
}

enum BodyKind {
    Json,
    Form,
}

fn body_kind(req: &Request) -> Option<BodyKind> {
    let content_type = req.headers().get(CONTENT_TYPE)?.to_str().ok()?;
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    match mime {
        "application/json" => Some(BodyKind::Json),
        "application/x-www-form-urlencoded" => Some(BodyKind::Form),
        _ => None,
    }
}

/// Accepts the body as JSON or as a urlencoded form.
#[async_trait]
impl<S> FromRequest<S> for ChatRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            Some(BodyKind::Json) => {
                let Json(body) = Json::<ChatRequest>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                Ok(body)
            }
            Some(BodyKind::Form) => {
                let Form(body) = Form::<ChatRequest>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                Ok(body)
            }
            None => Err(ApiError::unsupported_media_type(
                "expected application/json or application/x-www-form-urlencoded",
            )),
        }
    }
}

pub async fn chat(
    State(state): State<AppState>,
    request: ChatRequest,
) -> Result<Json<ChatResponse>, ApiError> {
    let outcome = state
        .store
        .respond(&request.session_id, request.message)
        .await?;

    Ok(Json(ChatResponse {
        session_id: outcome.session_id,
        answer: outcome.reply,
    }))
}
