//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Service index (public)
//! - `GET  /health`  - Health check: DB and cache (public)
//! - `/customers`, `/mechanics`, `/inventory`, `/service-tickets` - REST API
//!   (see [`crate::api::routes::api_routes`])
//! - anything else   - JSON 404 listing the available routes
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Content type** - JSON required for POST/PUT bodies
//! - **Rate limiting / caching** - Per route, declared in the route table
//! - **Authentication** - Customer JWT on `/customers/my-tickets`
//! - **Path normalization** - Trailing slash handling

use axum::{Router, middleware, routing::get};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

use crate::api;
use crate::api::handlers::{health_handler, index_handler, not_found_handler};
use crate::api::middleware::{content_type, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/customers/` and
/// `/customers` reach the same handler.
pub fn app_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::api_routes(&state))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(content_type::layer))
        .layer(tracing::layer());

    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(router))
}
