//! JSON sanitization of numeric grids.
//!
//! JSON has no representation for NaN or infinity, so every non-finite
//! sample becomes an explicit `null` before transport. Finite values pass
//! through unchanged.

use serde_json::{json, Value};

/// Sanitize a single value: non-finite becomes `null`.
pub fn sanitize_scalar(value: f64) -> Value {
    if value.is_finite() {
        json!(value)
    } else {
        Value::Null
    }
}

/// Sanitize a 1-D series into a JSON array.
pub fn sanitize_series(values: &[f64]) -> Value {
    Value::Array(values.iter().map(|&v| sanitize_scalar(v)).collect())
}

/// Sanitize a 2-D row-major grid into nested JSON arrays.
pub fn sanitize_grid(rows: &[Vec<f64>]) -> Value {
    Value::Array(rows.iter().map(|row| sanitize_series(row)).collect())
}
