//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Request DTOs keep required fields as `Option` so a
//! missing key is reported per field instead of failing deserialization.

pub mod auth;
pub mod customer;
pub mod health;
pub mod inventory;
pub mod limits;
pub mod mechanic;
pub mod pagination;
pub mod service_ticket;

use serde::Serialize;

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(entity: &str, id: i64) -> Self {
        Self {
            message: format!("{} id: {}, successfully deleted.", entity, id),
        }
    }
}
