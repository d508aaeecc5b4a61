//! Integration tests for the HTTP surface.
//!
//! Requests go straight through the router with `oneshot`, no socket bound.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use kaprekar_api::{create_app, handlers::RunResponse, AppState};
use kaprekar_core::{run, validate, RoutineConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_app(AppState::new(RoutineConfig::default()).unwrap())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

// =============================================================================
// Run
// =============================================================================

#[tokio::test]
async fn test_run_path_json() {
    let (status, body) = get(app(), "/v1/run/1234").await;
    assert_eq!(status, StatusCode::OK);

    let response: RunResponse = serde_json::from_str(&body).unwrap();
    assert!(response.converged);
    assert_eq!(response.steps, 3);
    assert_eq!(response.headline, "1234 reached 6174 in 3 steps");
    assert!(response.exhausted.is_none());
    assert_eq!(response.sequence, run(validate("1234").unwrap(), 50));
}

#[tokio::test]
async fn test_run_path_text() {
    let (status, body) = get(app(), "/v1/run/1234?format=text").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("SUCCESS!"));
    assert!(body.contains("8730 - 0378 = 8352"));
    assert!(body.contains("Reached 6174: Yes"));
}

#[tokio::test]
async fn test_run_path_exhausted() {
    let (status, body) = get(app(), "/v1/run/1024?max_steps=3").await;
    assert_eq!(status, StatusCode::OK);

    let response: RunResponse = serde_json::from_str(&body).unwrap();
    assert!(!response.converged);
    assert_eq!(response.steps, 3);
    let exhausted = response.exhausted.unwrap();
    assert_eq!(
        exhausted.message,
        "ROUTINE/EXHAUSTED: did not reach 6174 within 3 steps"
    );
}

#[tokio::test]
async fn test_run_path_rejects_duplicates() {
    let (status, body) = get(app(), "/v1/run/1111").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["kind"], "DuplicateDigits");
    assert_eq!(
        json["error"]["clarification"],
        "All 4 digits must be different (no repeated digits)"
    );
    assert_eq!(json["error"]["suggestions"][0], "1203");
}

#[tokio::test]
async fn test_run_path_rejects_wide_numbers() {
    let (status, body) = get(app(), "/v1/run/12345").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["kind"], "NotFourDigits");
}

#[tokio::test]
async fn test_run_body_number_and_text() {
    let (status, body) = post_json(app(), "/v1/run", &json!({ "input": 123 })).await;
    assert_eq!(status, StatusCode::OK);
    let response: RunResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.sequence.candidate.padded(), "0123");

    let (status, body) = post_json(
        app(),
        "/v1/run",
        &json!({ "input": " 9876 ", "max_steps": 1, "format": "json" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let response: RunResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.sequence.max_steps, 1);
}

#[tokio::test]
async fn test_run_body_rejects_text() {
    let (status, body) = post_json(app(), "/v1/run", &json!({ "input": "four" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["clarification"], "Input must be a valid number");
}

#[tokio::test]
async fn test_run_body_out_of_range_numbers_get_typed_errors() {
    for input in [
        json!(18446744073709551615u64),
        serde_json::from_str::<Value>("99999999999999999999").unwrap(),
        json!(1234.5),
    ] {
        let (status, body) = post_json(app(), "/v1/run", &json!({ "input": input })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "For: {}", input);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["kind"], "NotFourDigits", "For: {}", input);
        assert_eq!(json["error"]["suggestions"].as_array().unwrap().len(), 3);
    }

    let (_, body) = post_json(
        app(),
        "/v1/run",
        &json!({ "input": 18446744073709551615u64 }),
    )
    .await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["clarification"], "Number must be exactly 4 digits");
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let (status, body) = post_json(app(), "/v1/run", &json!({ "input": true })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"]["kind"].is_null());
    assert!(!json["error"]["message"].as_str().unwrap().is_empty());

    let (status, body) = get(app(), "/v1/run/1234?max_steps=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"]["message"].is_string());
}

// =============================================================================
// Verify / Survey / Health / Metrics
// =============================================================================

#[tokio::test]
async fn test_verify_roundtrip() {
    let sequence = serde_json::to_value(run(validate("1024").unwrap(), 50)).unwrap();
    let (status, body) = post_json(app(), "/v1/verify", &sequence).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ok"], true);
}

#[tokio::test]
async fn test_verify_detects_tampering() {
    let mut sequence = serde_json::to_value(run(validate("1234").unwrap(), 50)).unwrap();
    sequence["steps"][2]["value"] = json!(8353);
    let (status, body) = post_json(app(), "/v1/verify", &sequence).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ok"], false);
}

#[tokio::test]
async fn test_verify_rejects_invalid_candidate() {
    let mut sequence = serde_json::to_value(run(validate("1234").unwrap(), 50)).unwrap();
    sequence["candidate"] = json!(1111);
    let (status, body) = post_json(app(), "/v1/verify", &sequence).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"]["message"].is_string());
}

#[tokio::test]
async fn test_survey() {
    let (status, body) = get(app(), "/v1/survey").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total"], 5040);
    assert_eq!(json["worst_case"], 7);
    assert_eq!(json["exhausted"], 0);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["max_steps"], 50);
}

#[tokio::test]
async fn test_metrics_count_requests() {
    let app = app();
    get(app.clone(), "/v1/run/1234").await;
    get(app.clone(), "/v1/run/1024?max_steps=2").await;
    get(app.clone(), "/v1/run/0000").await;

    let (status, body) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("kaprekar_runs_total{outcome=\"converged\"} 1"));
    assert!(body.contains("kaprekar_runs_total{outcome=\"exhausted\"} 1"));
    assert!(body.contains("kaprekar_rejections_total{kind=\"duplicate_digits\"} 1"));
}
