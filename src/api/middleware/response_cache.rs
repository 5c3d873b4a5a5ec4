//! Caches successful GET responses for a fixed time.
//!
//! Entries are keyed by path and query and are never invalidated by writes:
//! a list may be stale for up to its TTL.

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use tracing::warn;

use crate::infrastructure::cache::CacheService;

pub const LIST_TTL_SECS: u64 = 30;
pub const ITEM_TTL_SECS: u64 = 60;

static X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// State of one route's cache layer.
#[derive(Clone)]
pub struct CachePolicy {
    cache: Arc<dyn CacheService>,
    ttl_seconds: u64,
}

/// Serves a cached body when present, otherwise runs the handler and stores
/// a `200 OK` body.
///
/// Hits carry `X-Cache: HIT`. Cache backend errors are treated as misses.
pub async fn layer(State(policy): State<CachePolicy>, req: Request, next: Next) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    if let Ok(Some(body)) = policy.cache.get(&key).await {
        metrics::counter!("response_cache_hits_total").increment(1);
        return (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
                (X_CACHE.clone(), HeaderValue::from_static("HIT")),
            ],
            body,
        )
            .into_response();
    }
    metrics::counter!("response_cache_misses_total").increment(1);

    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, key = %key, "Failed to buffer response for caching");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if let Ok(text) = std::str::from_utf8(&bytes)
        && let Err(e) = policy.cache.set(&key, text, policy.ttl_seconds).await
    {
        warn!(error = %e, key = %key, "Failed to store response in cache");
    }

    Response::from_parts(parts, Body::from(bytes))
}

/// Wraps a GET route with a response cache of `ttl_seconds`.
///
/// # Example
///
/// ```rust,ignore
/// let route = cached(get(list_mechanics_handler), &cache, LIST_TTL_SECS);
/// ```
pub fn cached<S>(
    route: MethodRouter<S>,
    cache: &Arc<dyn CacheService>,
    ttl_seconds: u64,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(
        CachePolicy {
            cache: cache.clone(),
            ttl_seconds,
        },
        layer,
    ))
}
