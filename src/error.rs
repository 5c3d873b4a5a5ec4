//! Application error type and its HTTP rendering.
//!
//! Every failure a handler can produce is an [`AppError`]. Field-level
//! validation failures render as a bare `field -> [messages]` map; every other
//! kind renders as `{"error": ..., "code": ..., "details": ...}`.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::utils::db_error::conflict_message;

/// Field name -> human readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "is_empty_details")]
    details: Value,
}

fn is_empty_details(details: &Value) -> bool {
    match details {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[derive(Debug)]
pub enum AppError {
    Validation { fields: FieldErrors },
    BadRequest { message: String, details: Value },
    UnsupportedContentType { message: String },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    RateLimited { message: String, retry_after_secs: u64 },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(fields: FieldErrors) -> Self {
        Self::Validation { fields }
    }

    /// Shortcut for a validation failure on a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), vec![message.into()]);
        Self::Validation { fields }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }
    pub fn unsupported_content_type(message: impl Into<String>) -> Self {
        Self::UnsupportedContentType {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn rate_limited(message: impl Into<String>, retry_after_secs: u64) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_secs,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::BadRequest { .. }
            | AppError::UnsupportedContentType { .. }
            | AppError::Conflict { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::BadRequest { .. } => "bad_request",
            AppError::UnsupportedContentType { .. } => "unsupported_content_type",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::RateLimited { .. } => "rate_limited",
            AppError::Internal { .. } => "internal_error",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation { fields } => {
                let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                write!(f, "validation failed for: {}", names.join(", "))
            }
            AppError::BadRequest { message, .. }
            | AppError::UnsupportedContentType { message }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::RateLimited { message, .. }
            | AppError::Internal { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        match self {
            AppError::Validation { fields } => (status, Json(fields)).into_response(),
            AppError::RateLimited {
                message,
                retry_after_secs,
            } => {
                let body = ErrorBody {
                    error: message,
                    code,
                    details: json!({ "retry_after": retry_after_secs }),
                };
                let mut response = (status, Json(body)).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
                response
            }
            AppError::Unauthorized { message, details } => {
                let body = ErrorBody {
                    error: message,
                    code,
                    details,
                };
                let mut response = (status, Json(body)).into_response();
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Bearer"),
                );
                response
            }
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Internal error");
                let body = ErrorBody {
                    error: message,
                    code,
                    details: Value::Null,
                };
                (status, Json(body)).into_response()
            }
            AppError::BadRequest { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details } => {
                let body = ErrorBody {
                    error: message,
                    code,
                    details,
                };
                (status, Json(body)).into_response()
            }
            AppError::UnsupportedContentType { message } => {
                let body = ErrorBody {
                    error: message,
                    code,
                    details: Value::Null,
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                let constraint = db.constraint().map(str::to_owned);
                return AppError::conflict(
                    conflict_message(constraint.as_deref()),
                    json!({ "constraint": constraint }),
                );
            }
            if db.is_foreign_key_violation() {
                return AppError::bad_request(
                    "Referenced record does not exist",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        if matches!(e, sqlx::Error::RowNotFound) {
            return AppError::not_found("Record not found", json!({}));
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({}).", e.code))
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        AppError::Validation { fields }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                AppError::unsupported_content_type("Content-Type must be application/json")
            }
            JsonRejection::JsonDataError(e) => AppError::invalid_field("body", e.body_text()),
            JsonRejection::JsonSyntaxError(e) => AppError::invalid_field("body", e.body_text()),
            other => AppError::bad_request(other.body_text(), json!({})),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::not_found(
            "Resource not found",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text(), json!({}))
    }
}
