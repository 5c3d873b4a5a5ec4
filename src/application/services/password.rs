//! bcrypt helpers run on the blocking thread pool.

use serde_json::json;

use crate::error::AppError;

/// Hashes a plaintext password with a fresh salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails or the blocking task panics.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| failure("Password hashing task failed", e))?
        .map_err(|e| failure("Password hashing failed", e))
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| failure("Password check task failed", e))?;

    Ok(verified.unwrap_or(false))
}

fn failure(message: &str, reason: impl std::fmt::Display) -> AppError {
    AppError::internal(message, json!({ "reason": reason.to_string() }))
}
