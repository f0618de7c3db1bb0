//! Integration tests for REST API endpoints
//!
//! These tests build the real router around a `MockProvider` and exercise
//! the endpoints end-to-end with `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use base64::Engine;
use http_body_util::BodyExt;
use prdcase_llm::MockProvider;
use prdcase_server::api::create_router;
use prdcase_server::api::rest::{AppState, GenerateResponse, ACCESS_PASSWORD_HEADER};
use prdcase_server::config::{RateLimitConfig, ServerConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const TABLE_REPLY: &str = "## Functional Test Cases\n\
| ID | Title | Type | Steps | Expected Result | Priority |\n\
|----|-------|------|-------|------------------|----------|\n\
| TC-FUNC-001 | Login succeeds | Functional | 1. Open login<br>2. Enter creds<br>3. Submit | User is redirected to dashboard | High |\n\
| TC-FUNC-002 | Say \"hello\" | Functional | Type hello | Greeting shown | Low |\n";

fn test_config() -> ServerConfig {
    ServerConfig {
        rate_limit: RateLimitConfig {
            max_requests: 100,
            window_secs: 60,
        },
        ..ServerConfig::default()
    }
}

fn router_with(config: &ServerConfig, reply: &str) -> (Arc<MockProvider>, Router) {
    let provider = Arc::new(MockProvider::with_response(reply.to_string()));
    let state = AppState::new(config, provider.clone());
    (provider, create_router(state, config.body_limit()))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_, app) = router_with(&test_config(), TABLE_REPLY);

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["aiProvider"], "mock");
    assert!(json.get("ollama").is_none());
}

// =============================================================================
// Generate
// =============================================================================

#[tokio::test]
async fn test_generate_from_content() {
    let (provider, app) = router_with(&test_config(), TABLE_REPLY);

    let response = app
        .oneshot(post_json(
            "/api/generate",
            json!({
                "content": "Users log in with email and password.",
                "fileName": "login.md",
                "scenarioTypes": "functional,negative"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload: GenerateResponse = serde_json::from_value(body_json(response).await).unwrap();

    assert!(payload.success);
    assert!(payload.parsed);
    assert!(payload.notice.is_none());
    assert_eq!(payload.test_cases, TABLE_REPLY);
    assert_eq!(payload.cases.len(), 2);
    assert_eq!(payload.cases[0].steps, vec!["Open login", "Enter creds", "Submit"]);
    assert_eq!(payload.metadata.file_name, "login.md");
    assert_eq!(payload.metadata.extracted_length, 37);
    assert_eq!(payload.metadata.ai_provider, "mock");

    let request = &provider.requests()[0];
    assert!(request.prompt.contains("Users log in with email and password."));
    assert!(request.prompt.contains("NEGATIVE:"));
    assert!(!request.prompt.contains("EDGE CASE:"));
}

#[tokio::test]
async fn test_generate_from_data_url() {
    let (provider, app) = router_with(&test_config(), TABLE_REPLY);
    let encoded = base64::engine::general_purpose::STANDARD.encode("# Reset password\nSend a link.");

    let response = app
        .oneshot(post_json(
            "/api/generate",
            json!({
                "file": format!("data:text/markdown;base64,{}", encoded),
                "fileName": "reset.md",
                "format": "gherkin"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["format"], "gherkin");
    assert_eq!(json["strategy"], "structured_table");
    assert!(provider.requests()[0].prompt.contains("# Reset password"));
}

#[tokio::test]
async fn test_unparseable_reply_carries_notice() {
    let (_, app) = router_with(&test_config(), "Sorry, I cannot.");

    let response = app
        .oneshot(post_json("/api/generate", json!({"content": "PRD"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["parsed"], false);
    assert_eq!(json["cases"], json!([]));
    assert_eq!(json["testCases"], "Sorry, I cannot.");
    assert!(json["notice"].as_str().unwrap().contains("raw output"));
}

#[tokio::test]
async fn test_missing_document_is_bad_request() {
    let (provider, app) = router_with(&test_config(), TABLE_REPLY);

    let response = app
        .oneshot(post_json("/api/generate", json!({"format": "table"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("No file or content provided"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_whitespace_document_is_bad_request() {
    let (provider, app) = router_with(&test_config(), TABLE_REPLY);

    let response = app
        .oneshot(post_json("/api/generate", json!({"content": "   \n"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_format_is_bad_request() {
    let (_, app) = router_with(&test_config(), TABLE_REPLY);

    let response = app
        .oneshot(post_json("/api/generate", json!({"content": "PRD", "format": "yaml"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pdf_is_unsupported_media() {
    let (_, app) = router_with(&test_config(), TABLE_REPLY);
    let encoded = base64::engine::general_purpose::STANDARD.encode("%PDF-1.7");

    let response = app
        .oneshot(post_json(
            "/api/generate",
            json!({"file": format!("data:application/pdf;base64,{}", encoded)}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let (_, app) = router_with(&test_config(), TABLE_REPLY);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("JSON syntax error"));
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let config = test_config();
    let state = AppState::new(&config, Arc::new(MockProvider::failing("Ollama API error")));
    let app = create_router(state, config.body_limit());

    let response = app
        .oneshot(post_json("/api/generate", json!({"content": "PRD"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Ollama API error"));
}

// =============================================================================
// CSV Export
// =============================================================================

#[tokio::test]
async fn test_generate_csv_download() {
    let (_, app) = router_with(&test_config(), TABLE_REPLY);

    let response = app
        .oneshot(post_json(
            "/api/generate/csv",
            json!({"content": "PRD", "fileName": "login prd.md"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"login-prd-test-cases-"));
    assert!(disposition.ends_with(".csv\""));

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "\"ID\",\"Title\",\"Type\",\"Steps\",\"Expected Result\",\"Priority\""
    );
    assert!(lines[2].contains("\"Say \"\"hello\"\"\""));
}

// =============================================================================
// Access Control
// =============================================================================

#[tokio::test]
async fn test_password_gate() {
    let config = ServerConfig {
        access_password: Some("s3cret".to_string()),
        ..test_config()
    };
    let (provider, app) = router_with(&config, TABLE_REPLY);

    let missing = app
        .clone()
        .oneshot(post_json("/api/generate", json!({"content": "PRD"})))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let mut wrong = post_json("/api/generate", json!({"content": "PRD"}));
    wrong
        .headers_mut()
        .insert(ACCESS_PASSWORD_HEADER, "guess".parse().unwrap());
    let wrong = app.clone().oneshot(wrong).await.unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let mut right = post_json("/api/generate", json!({"content": "PRD"}));
    right
        .headers_mut()
        .insert(ACCESS_PASSWORD_HEADER, "s3cret".parse().unwrap());
    let right = app.clone().oneshot(right).await.unwrap();
    assert_eq!(right.status(), StatusCode::OK);

    assert_eq!(provider.call_count(), 1);

    // Health stays open
    let health = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_per_client() {
    let config = ServerConfig {
        rate_limit: RateLimitConfig {
            max_requests: 2,
            window_secs: 3600,
        },
        ..ServerConfig::default()
    };
    let (_, app) = router_with(&config, TABLE_REPLY);

    let request_from = |ip: &str| {
        let mut request = post_json("/api/generate", json!({"content": "PRD"}));
        request
            .headers_mut()
            .insert("x-forwarded-for", ip.parse().unwrap());
        request
    };

    for _ in 0..2 {
        let response = app.clone().oneshot(request_from("203.0.113.1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let limited = app.clone().oneshot(request_from("203.0.113.1")).await.unwrap();
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(limited.headers().contains_key(header::RETRY_AFTER));

    let other = app.oneshot(request_from("203.0.113.2")).await.unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}
