//! Rejects POST/PUT bodies that are not declared as JSON.

use axum::{
    body::HttpBody,
    extract::Request,
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// Requires `Content-Type: application/json` on POST and PUT requests that
/// carry a body. Bodyless requests (e.g. `PUT .../assign-mechanic/{id}`)
/// pass through untouched.
///
/// Applied to the whole router, so it runs before rate limiting, caching and
/// every handler.
pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    if matches!(*req.method(), Method::POST | Method::PUT)
        && has_body(&req)
        && !is_json(req.headers())
    {
        return Err(AppError::unsupported_content_type(
            "Content-Type must be application/json",
        ));
    }

    Ok(next.run(req).await)
}

fn has_body(req: &Request) -> bool {
    let headers = req.headers();

    let declared_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .is_some_and(|len| len > 0);

    let chunked = headers
        .get(header::TRANSFER_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_ascii_lowercase().contains("chunked"));

    declared_length || chunked || req.body().size_hint().lower() > 0
}

/// `application/json`, with or without parameters such as `charset`.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
