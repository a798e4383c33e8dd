//! Request helpers shared by the router tests.
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Extract response body as JSON for testing
pub async fn extract_response_body(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!({"error": "Invalid JSON response"}));

    // Log error details for debugging
    if status.is_server_error() || status.is_client_error() {
        eprintln!("HTTP Error - Status: {status}, Body: {body:?}");
    }

    (status, body)
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    extract_response_body(response).await
}

pub async fn post_json(app: &axum::Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    extract_response_body(response).await
}

/// A complete, valid project creation body
pub fn project_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "status": "planning",
        "budget": 100,
        "deadline": "2025-01-01"
    })
}

/// Create a test project through the API, returning its id and body
pub async fn create_test_project(app: &axum::Router, title: &str) -> Result<(i64, Value), String> {
    let (status, body) = post_json(app, "/api/projects", &project_body(title)).await;

    if status == StatusCode::CREATED {
        let project_id = body["id"].as_i64().ok_or("Response has no integer id")?;
        Ok((project_id, body))
    } else {
        Err(format!("Failed to create project: Status {status}, Body: {body}"))
    }
}
