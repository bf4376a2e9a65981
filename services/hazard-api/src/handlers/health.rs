//! Health endpoint.

use axum::http::{header, StatusCode};
use axum::response::Response;

/// GET /health
pub async fn health_handler() -> Response {
    let body = serde_json::json!({ "status": "ok" }).to_string();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("static response")
}
