//! Permissive CORS for the embeddable widget.
//!
//! `CorsLayer` answers every `OPTIONS` request (any path) with `200`, an
//! empty body and the allow headers; other responses get the wildcard origin.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

/// Request headers the widget sends.
pub const ALLOW_HEADERS: [HeaderName; 4] = [
    AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    CONTENT_TYPE,
];

pub const ALLOW_METHODS: [Method; 3] = [Method::POST, Method::GET, Method::OPTIONS];

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(ALLOW_HEADERS)
        .allow_methods(ALLOW_METHODS)
}
