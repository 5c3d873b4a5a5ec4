//! Repository trait for inventory data access.

use crate::domain::entities::{Inventory, InventoryPatch, NewInventory};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing parts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgInventoryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn create(&self, new_item: NewInventory) -> Result<Inventory, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Inventory>, AppError>;

    /// Lists all parts ordered by id.
    async fn list(&self) -> Result<Vec<Inventory>, AppError>;

    /// Applies a partial update. Returns `None` if the part does not exist.
    async fn update(&self, id: i64, patch: InventoryPatch)
    -> Result<Option<Inventory>, AppError>;

    /// Deletes a part. Tickets that used it are kept; only the association
    /// rows go away.
    ///
    /// Returns `Ok(false)` if no part had that id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
