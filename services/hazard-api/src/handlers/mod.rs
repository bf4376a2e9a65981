//! HTTP handlers for the hazard API.

pub mod current;
pub mod health;
pub mod scenario;
pub mod series;
pub mod snapshots;

use axum::http::{header, StatusCode};
use axum::response::Response;
use hazard_common::HazardError;

/// Map a core error onto an HTTP response.
pub(crate) fn error_response(err: &HazardError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({ "error": err.to_string() }).to_string();
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("static response")
}

/// Serialize a payload as a 200 JSON response.
pub(crate) fn json_response(value: &serde_json::Value) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(value.to_string().into())
        .expect("static response")
}
