//! Extractors whose rejections render through [`AppError`].

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::AppError;

/// Like [`axum::Json`], but failures render through [`AppError`].
///
/// An empty body is read as `{}`, so a create request without a body reports
/// its missing required fields. Content-Type is checked by
/// [`crate::api::middleware::content_type`] before any handler runs.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text(), json!({})))?;

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes[..]
        };

        let Json(value) = Json::<T>::from_bytes(body)?;
        Ok(ApiJson(value))
    }
}

/// Like [`axum::extract::Path`]; a segment that does not parse is a 404.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
