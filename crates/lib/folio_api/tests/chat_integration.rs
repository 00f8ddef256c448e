//! Integration tests: build the router over stub backends and call it in-process.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use folio_api::{AppState, config::ApiConfig};
use folio_core::backend::{InferenceBackend, RawResponse, TransportError};
use folio_core::config::InferenceConfig;
use folio_core::demo::DemoResponseTable;
use folio_core::{ChatResponder, LocaleTag};
use tower::ServiceExt;

/// Returns the same raw reply for every prompt; echoes the prompt if asked.
struct StubBackend {
    status: u16,
    body: String,
    echo_prompt: bool,
}

#[async_trait]
impl InferenceBackend for StubBackend {
    async fn generate(&self, prompt: &str) -> Result<RawResponse, TransportError> {
        let body = if self.echo_prompt {
            serde_json::json!([{ "generated_text": format!("{prompt}{}", self.body) }]).to_string()
        } else {
            self.body.clone()
        };
        Ok(RawResponse::json(self.status, body))
    }
}

struct PanickingBackend;

#[async_trait]
impl InferenceBackend for PanickingBackend {
    async fn generate(&self, _prompt: &str) -> Result<RawResponse, TransportError> {
        panic!("backend exploded");
    }
}

fn table() -> Arc<DemoResponseTable> {
    Arc::new(DemoResponseTable::builtin().expect("builtin table"))
}

fn app(api_key: Option<&str>, backend: Arc<dyn InferenceBackend>) -> Router {
    let inference = InferenceConfig::new("http://inference.test", api_key.map(str::to_string));
    let config = ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        inference: inference.clone(),
        demo_responses_path: None,
    };
    let responder = ChatResponder::new(table(), inference, backend);
    folio_api::router(AppState {
        config,
        responder: Arc::new(responder),
    })
}

fn stub(status: u16, body: &str) -> Arc<dyn InferenceBackend> {
    Arc::new(StubBackend {
        status,
        body: body.into(),
        echo_prompt: false,
    })
}

fn chat_request(body: &str, language: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json");
    if let Some(language) = language {
        builder = builder.header("accept-language", language);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&body).expect("parse JSON");
    (status, json)
}

#[tokio::test]
async fn missing_message_is_bad_request() {
    for body in [r#"{}"#, r#"{"context":"projects"}"#, r#"{"message":"   "}"#] {
        let (status, json) = call(app(None, stub(200, "")), chat_request(body, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["message"], "Message is required");
        assert!(json.get("response").is_none(), "no canned reply on client error");
    }
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (status, json) = call(app(None, stub(200, "")), chat_request("{ nope", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn demo_mode_answers_in_spanish() {
    let (status, json) = call(
        app(None, stub(200, "")),
        chat_request(r#"{"message":"hola"}"#, Some("es-ES,es;q=0.9")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["demo"], true);
    assert!(json.get("reason").is_none());
    assert_eq!(json["response"], table().lookup("hola", None, LocaleTag::Es));
}

#[tokio::test]
async fn demo_mode_defaults_to_english() {
    let (_, json) = call(
        app(Some("your_huggingface_api_key_here"), stub(200, "")),
        chat_request(r#"{"message":"hello","context":"hero"}"#, None),
    )
    .await;
    assert_eq!(json["demo"], true);
    assert_eq!(json["response"], table().lookup("hello", Some("hero"), LocaleTag::En));
}

#[tokio::test]
async fn generated_reply_strips_prompt_echo() {
    let backend = Arc::new(StubBackend {
        status: 200,
        body: " Hello, adventurer!".into(),
        echo_prompt: true,
    });
    let (status, json) = call(
        app(Some("hf_test"), backend),
        chat_request(r#"{"message":"hi","context":"about"}"#, Some("en-US")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "response": "Hello, adventurer!", "success": true }));
}

#[tokio::test]
async fn html_payload_falls_back_with_reason() {
    let (status, json) = call(
        app(Some("hf_test"), stub(200, "<!DOCTYPE html><html><body>Error</body></html>")),
        chat_request(r#"{"message":"what projects?"}"#, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["demo"], true);
    assert_eq!(json["reason"], "non-JSON payload");
    assert_eq!(json["response"], table().lookup("what projects?", None, LocaleTag::En));
}

#[tokio::test]
async fn http_error_falls_back_with_status_reason() {
    let (_, json) = call(
        app(Some("hf_test"), stub(503, r#"{"error":"unavailable"}"#)),
        chat_request(r#"{"message":"hi"}"#, Some("es")),
    )
    .await;
    assert_eq!(json["demo"], true);
    assert_eq!(json["reason"], "HTTP 503");
    assert_eq!(json["response"], table().lookup("hi", None, LocaleTag::Es));
}

#[tokio::test]
async fn model_loading_is_not_demo() {
    let (status, json) = call(
        app(
            Some("hf_test"),
            stub(200, r#"{"error":"Model is currently loading","estimated_time":12.5}"#),
        ),
        chat_request(r#"{"message":"hi"}"#, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json.get("demo").is_none());
    let text = json["response"].as_str().expect("response is string");
    assert!(text.contains("warming up"), "unexpected reply: {text}");
}

#[tokio::test]
async fn boundary_failure_is_server_error() {
    let (status, json) = call(
        app(Some("hf_test"), Arc::new(PanickingBackend)),
        chat_request(r#"{"message":"hi"}"#, None),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "internal_error");
    assert!(!json["response"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn health_reports_configuration() {
    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, json) = call(app(None, stub(200, "")), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["inferenceConfigured"], false);
    assert_eq!(json["locales"], serde_json::json!(["en", "es"]));
    assert_eq!(json["version"], folio_core::version());
    assert!(
        json["topics"]["es"]
            .as_array()
            .is_some_and(|t| t.iter().any(|k| k == "greeting")),
        "unexpected topics: {}",
        json["topics"]
    );
}

#[tokio::test]
async fn demo_server_starts_with_malformed_endpoint() {
    let state = AppState::from_config(ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        inference: InferenceConfig::new("not a url", None),
        demo_responses_path: None,
    })
    .expect("demo mode needs no valid endpoint");
    let (status, json) = call(
        folio_api::router(state),
        chat_request(r#"{"message":"hello"}"#, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["demo"], true);
    assert_eq!(json["response"], table().lookup("hello", None, LocaleTag::En));
}
