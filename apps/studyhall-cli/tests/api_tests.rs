use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use studyhall_cli::server::handlers::{AskRequest, ErrorResponse, HealthResponse, ReloadResponse};
use studyhall_cli::server::{router, AppState};
use studyhall_core::types::AnswerResult;
use studyhall_qa::QaEngine;

fn app(tmp: &TempDir) -> axum::Router {
    let engine = QaEngine::open(tmp.path().join("qa_dataset.json")).expect("engine");
    router(Arc::new(AppState::new(engine, 3)))
}

async fn post(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::post(uri).header("content-type", "application/json").body(Body::from(body.to_string())).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec())
}

#[tokio::test]
async fn health_reports_corpus_size() {
    let tmp = TempDir::new().unwrap();
    let response = app(&tmp).oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: HealthResponse = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body.status, "ok");
    assert_eq!(body.items, 5);
}

#[tokio::test]
async fn ask_returns_answer_payload() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = post(app(&tmp), "/api/ask", r#"{"question": "  Explain binary search ", "subject": "Computer Science"}"#).await;
    assert_eq!(status, StatusCode::OK);

    let raw: serde_json::Value = serde_json::from_slice(&body).unwrap();
    for field in ["answer", "subject", "confidence", "sources"] {
        assert!(raw.get(field).is_some(), "missing {field}");
    }
    let result: AnswerResult = serde_json::from_value(raw).unwrap();
    assert_eq!(result.subject, "Computer Science");
    assert!(result.confidence > 0.5);
    assert_eq!(result.sources.len(), 3);
}

#[tokio::test]
async fn ask_honours_top_k_and_default_subject() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = post(app(&tmp), "/api/ask", r#"{"question": "Pythagorean theorem", "subject": "  ", "top_k": 4}"#).await;
    assert_eq!(status, StatusCode::OK);
    let result: AnswerResult = serde_json::from_slice(&body).unwrap();
    assert_eq!(result.subject, "Mathematics");
    assert_eq!(result.sources.len(), 4);
}

#[tokio::test]
async fn ask_rejects_missing_or_blank_question() {
    let tmp = TempDir::new().unwrap();
    for body in [r#"{"question": "   "}"#, "{}", "not json", r#"{"question": 7}"#] {
        let (status, bytes) = post(app(&tmp), "/api/ask", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        let err: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(err.error, "Question is required.");
    }
}

#[tokio::test]
async fn reload_rebuilds_from_store() {
    let tmp = TempDir::new().unwrap();
    let app = app(&tmp);
    std::fs::write(
        tmp.path().join("qa_dataset.json"),
        r#"[{"question": "What is a verb?", "answer": "A word for an action.", "subject": "English"}]"#,
    )
    .unwrap();

    let (status, body) = post(app.clone(), "/api/reload", "").await;
    assert_eq!(status, StatusCode::OK);
    let reloaded: ReloadResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(reloaded.items, 1);

    let (_, body) = post(app, "/api/ask", r#"{"question": "verb"}"#).await;
    let result: AnswerResult = serde_json::from_slice(&body).unwrap();
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.answer, "A word for an action.");
}

#[tokio::test]
async fn failed_reload_is_a_server_error() {
    let tmp = TempDir::new().unwrap();
    let app = app(&tmp);
    std::fs::write(tmp.path().join("qa_dataset.json"), r#"{"not": "a list"}"#).unwrap();

    let (status, body) = post(app.clone(), "/api/reload", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(err.error.contains("not a list of records"));

    let response = app.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(health.items, 5);
}

#[tokio::test]
async fn badly_typed_optional_fields_fall_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    for body in [
        r#"{"question": "Explain binary search", "top_k": -1}"#,
        r#"{"question": "Explain binary search", "top_k": "5"}"#,
        r#"{"question": "Explain binary search", "subject": 3}"#,
    ] {
        let (status, bytes) = post(app(&tmp), "/api/ask", body).await;
        assert_eq!(status, StatusCode::OK, "body {body}");
        let result: AnswerResult = serde_json::from_slice(&bytes).unwrap();
        assert!(result.answer.contains("Binary search"));
        assert_eq!(result.sources.len(), 3, "default window for {body}");
    }
}

#[test]
fn ask_request_decodes_each_field_independently() {
    let request = AskRequest::from_body(br#"{"question": "q", "subject": ["x"], "top_k": 2.5}"#);
    assert_eq!(request, AskRequest { question: Some("q".to_string()), subject: None, top_k: None });

    let request = AskRequest::from_body(br#"{"question": "q", "subject": "Physics", "top_k": 4}"#);
    assert_eq!(request.subject.as_deref(), Some("Physics"));
    assert_eq!(request.top_k, Some(4));

    assert_eq!(AskRequest::from_body(b"[1, 2]"), AskRequest::default());
    assert_eq!(AskRequest::from_body(b"not json"), AskRequest::default());
}
