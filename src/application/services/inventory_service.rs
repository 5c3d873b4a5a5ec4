//! Inventory (parts) service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{Inventory, InventoryPatch, NewInventory};
use crate::domain::repositories::InventoryRepository;
use crate::error::AppError;

/// Service for managing parts kept in inventory.
pub struct InventoryService<R: InventoryRepository> {
    repository: Arc<R>,
}

impl<R: InventoryRepository> InventoryService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, new_item: NewInventory) -> Result<Inventory, AppError> {
        let item = self.repository.create(new_item).await?;
        info!(inventory_id = item.id, "Inventory item created");
        Ok(item)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no item has that id.
    pub async fn get(&self, id: i64) -> Result<Inventory, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Inventory>, AppError> {
        self.repository.list().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no item has that id.
    pub async fn update(&self, id: i64, patch: InventoryPatch) -> Result<Inventory, AppError> {
        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes an item and detaches it from every ticket.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no item has that id.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        info!(inventory_id = id, "Inventory item deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Inventory item not found", json!({ "id": id }))
}
