//! Climate hazard HTTP API.
//!
//! Thin axum transport over the core crates: query-string parsing and
//! HTTP status mapping live here; routing, selection, statistics and
//! caching live in `climate-store`, `hazard-analytics` and
//! `current-feed`.

pub mod handlers;
pub mod state;
