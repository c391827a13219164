//! stylist-server: HTTP front for the conversation engine.
//!
//! Exposes the chat turn endpoint, a read-only session summary and a
//! health probe. All conversation state lives in the `SessionStore`.

pub mod error;
pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use stylist_ai::SessionStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: SessionStore,
}

impl AppState {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

/// Build the router. `cors_allow_any_origin` adds a permissive CORS layer.
pub fn build_app(state: AppState, cors_allow_any_origin: bool) -> Router {
    let router = Router::new()
        .route("/api/chat", post(routes::chat))
        .route("/api/sessions/:session_id", get(routes::get_session))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_allow_any_origin {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
