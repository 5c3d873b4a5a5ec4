//! Service index and the JSON fallback for unmatched routes.

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

/// Top-level route prefixes, listed by the index and by 404 responses.
pub const AVAILABLE_ROUTES: [&str; 6] = [
    "/customers",
    "/mechanics",
    "/service-tickets",
    "/inventory",
    "/health",
    "/",
];

/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "routes": AVAILABLE_ROUTES,
    }))
}

/// Fallback for any request that matched no route.
pub async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "code": "not_found",
            "available_routes": AVAILABLE_ROUTES,
        })),
    )
}
