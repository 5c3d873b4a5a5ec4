//! Repository trait for mechanic data access.

use crate::domain::entities::{Mechanic, MechanicPatch, NewMechanic, RankedMechanic};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing mechanics.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMechanicRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MechanicRepository: Send + Sync {
    /// Creates a new mechanic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already taken.
    async fn create(&self, new_mechanic: NewMechanic) -> Result<Mechanic, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Mechanic>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Mechanic>, AppError>;

    /// Lists all mechanics ordered by id.
    async fn list(&self) -> Result<Vec<Mechanic>, AppError>;

    /// Lists every mechanic with its count of distinct tickets, highest first.
    ///
    /// Mechanics without tickets are included with a count of zero. Ties are
    /// ordered by id.
    async fn ranking(&self) -> Result<Vec<RankedMechanic>, AppError>;

    /// Applies a partial update. Returns `None` if the mechanic does not exist.
    async fn update(&self, id: i64, patch: MechanicPatch) -> Result<Option<Mechanic>, AppError>;

    /// Deletes a mechanic and its ticket assignments.
    ///
    /// Returns `Ok(false)` if no mechanic had that id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
