//! Route tests driven through the full router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use stylist_ai::testing::ScriptedClient;
use stylist_ai::{AiError, PipelineSettings, SessionStore};
use tower::ServiceExt;

use crate::{build_app, AppState};

fn app_with(client: Arc<ScriptedClient>) -> (Router, SessionStore) {
    let store = SessionStore::new(client, PipelineSettings::default());
    let app = build_app(AppState::new(store.clone()), true);
    (app, store)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn chat_accepts_json_body() {
    let client = Arc::new(ScriptedClient::new());
    client.push_reply(Ok("Navy chinos would work well."));
    let (app, _) = app_with(client);

    let response = app
        .oneshot(json_request(
            "/api/chat",
            serde_json::json!({ "session_id": "abc", "message": "What goes with a white shirt?" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["session_id"], "abc");
    assert_eq!(body["answer"], "Navy chinos would work well.");
}

#[tokio::test]
async fn chat_accepts_form_body() {
    let (app, store) = app_with(Arc::new(ScriptedClient::new()));

    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("session_id=form-1&message=hi+there"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["answer"], "reply to: hi there");
    assert_eq!(store.snapshot("form-1").await.unwrap().messages.len(), 2);
}

#[tokio::test]
async fn chat_failure_returns_envelope() {
    let client = Arc::new(ScriptedClient::new());
    client.push_reply(Err(AiError::RateLimited));
    let (app, store) = app_with(client);

    let response = app
        .clone()
        .oneshot(json_request(
            "/api/chat",
            serde_json::json!({ "session_id": "abc", "message": "hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["status"], 502);
    assert!(body["message"].as_str().unwrap().starts_with("turn failed"));
    assert!(store.snapshot("abc").await.is_none());

    let request = Request::builder()
        .uri("/api/sessions/abc")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_rejects_missing_fields() {
    let (app, _) = app_with(Arc::new(ScriptedClient::new()));

    let response = app
        .oneshot(json_request(
            "/api/chat",
            serde_json::json!({ "session_id": "abc" }),
        ))
        .await
        .unwrap();

    let status = response.status();
    assert!(status.is_client_error());
    let body = body_json(response).await;
    assert_eq!(body["status"], status.as_u16());
    assert!(body["message"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn chat_rejects_unsupported_content_type() {
    let (app, _) = app_with(Arc::new(ScriptedClient::new()));

    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from("hello"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = body_json(response).await;
    assert_eq!(body["status"], 415);
}

#[tokio::test]
async fn session_summary_reports_profile() {
    let client = Arc::new(ScriptedClient::new());
    client.push_extraction(Ok(serde_json::json!({ "colors": ["red"], "name": "Sam" })));
    let (app, _) = app_with(client);

    let response = app
        .clone()
        .oneshot(json_request(
            "/api/chat",
            serde_json::json!({ "session_id": "s1", "message": "I'm Sam and I love red" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .uri("/api/sessions/s1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["session_id"], "s1");
    assert_eq!(body["message_count"], 2);
    assert_eq!(body["profile"]["name"], "Sam");
    assert_eq!(body["profile"]["colors"], serde_json::json!(["red"]));
    assert_eq!(body["usage"]["input_tokens"], 20);
    assert_eq!(body["usage_by_stage"]["reply"]["input_tokens"], 10);
    assert_eq!(body["usage_by_stage"]["extraction"]["output_tokens"], 5);
    assert_eq!(body["model_calls"], 2);
}

#[tokio::test]
async fn unknown_session_is_not_found_and_not_created() {
    let (app, store) = app_with(Arc::new(ScriptedClient::new()));

    let request = Request::builder()
        .uri("/api/sessions/ghost")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert!(!store.exists("ghost").await);
}

#[tokio::test]
async fn health_reports_session_count() {
    let (app, store) = app_with(Arc::new(ScriptedClient::new()));
    store.respond("one", "hi").await.unwrap();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["sessions"], 1);
}
