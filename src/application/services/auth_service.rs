//! Customer authentication: login and JWT issuance/verification.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::password::{hash_password, verify_password};
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;

/// Claims carried by a customer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub customer_id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Reasons a request fails to authenticate.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token is missing")]
    MissingToken,
    #[error("Token is invalid")]
    InvalidToken,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Token generation failed: {0}")]
    Signing(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Signing(reason) => {
                AppError::internal("Token generation failed", json!({ "reason": reason }))
            }
            other => AppError::unauthorized(other.to_string(), json!({})),
        }
    }
}

/// Strips an optional `Bearer ` prefix from an `Authorization` header value.
///
/// # Errors
///
/// Returns [`AuthError::MissingToken`] if the header is absent or empty.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.map(str::trim).unwrap_or_default();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// Service for customer login and token handling.
///
/// Tokens are HS256 JWTs signed with `jwt_secret`. A valid token must also
/// reference a customer that still exists.
///
/// Login against an unknown email still runs one bcrypt verification, against
/// a hash made at `bcrypt_cost`, so both failures take the same time.
pub struct AuthService<R: CustomerRepository> {
    repository: Arc<R>,
    jwt_secret: String,
    token_ttl: Duration,
    bcrypt_cost: u32,
    dummy_hash: OnceCell<String>,
}

impl<R: CustomerRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - customer repository used for login and existence checks
    /// - `jwt_secret` - HMAC key for signing tokens
    /// - `token_ttl_hours` - lifetime of issued tokens
    pub fn new(repository: Arc<R>, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            repository,
            jwt_secret,
            token_ttl: Duration::hours(token_ttl_hours),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Sets the cost of the hash checked for unknown emails. Should match the
    /// cost customer passwords are stored with.
    pub fn with_bcrypt_cost(mut self, bcrypt_cost: u32) -> Self {
        self.bcrypt_cost = bcrypt_cost;
        self
    }

    /// Issues a signed token for a customer.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if encoding fails.
    pub fn issue_token(&self, customer_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            customer_id,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verifies signature and expiry and returns the customer id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for a bad signature, malformed token
    /// or expired token.
    pub fn verify_token(&self, token: &str) -> Result<i64, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims.customer_id)
        .map_err(|e| {
            debug!("Token rejected: {}", e);
            AuthError::InvalidToken
        })
    }

    /// Authenticates a raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the header is missing, the token
    /// is invalid, or its customer no longer exists.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<i64, AppError> {
        let token = bearer_token(header)?;
        let customer_id = self.verify_token(token)?;

        if self.repository.find_by_id(customer_id).await?.is_none() {
            return Err(AuthError::InvalidToken.into());
        }

        Ok(customer_id)
    }

    /// Exchanges email and password for a token.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    pub async fn login(&self, email: &str, password: String) -> Result<String, AppError> {
        let Some(customer) = self.repository.find_by_email(email).await? else {
            verify_password(password, self.dummy_hash().await?).await?;
            warn!("Failed login attempt");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, customer.password_hash).await? {
            warn!(customer_id = customer.id, "Failed login attempt");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(self.issue_token(customer.id)?)
    }

    async fn dummy_hash(&self) -> Result<String, AppError> {
        self.dummy_hash
            .get_or_try_init(|| hash_password(String::from("unknown-customer"), self.bcrypt_cost))
            .await
            .cloned()
    }
}
