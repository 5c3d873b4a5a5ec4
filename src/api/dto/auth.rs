//! DTOs for customer login.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Request body for `POST /customers/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Missing data for required field."),
        email(message = "Not a valid email address.")
    )]
    pub email: Option<String>,

    #[validate(required(message = "Missing data for required field."))]
    pub password: Option<String>,
}

/// Validated login credentials.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either field is missing or the
    /// email is malformed.
    pub fn validated(self) -> Result<Credentials, AppError> {
        self.validate()?;

        Ok(Credentials {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Signed token returned by a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
