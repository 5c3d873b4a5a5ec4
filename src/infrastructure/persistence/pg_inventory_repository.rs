//! PostgreSQL implementation of inventory repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Inventory, InventoryPatch, NewInventory};
use crate::domain::repositories::InventoryRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct InventoryRow {
    id: i64,
    name: String,
    price: Decimal,
}

impl From<InventoryRow> for Inventory {
    fn from(r: InventoryRow) -> Self {
        Inventory::new(r.id, r.name, r.price)
    }
}

/// PostgreSQL repository for parts.
pub struct PgInventoryRepository {
    pool: Arc<PgPool>,
}

impl PgInventoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    async fn create(&self, new_item: NewInventory) -> Result<Inventory, AppError> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            INSERT INTO inventory (name, price)
            VALUES ($1, $2)
            RETURNING id, name, price
            "#,
        )
        .bind(new_item.name)
        .bind(new_item.price)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Inventory>, AppError> {
        let row = sqlx::query_as::<_, InventoryRow>(
            "SELECT id, name, price FROM inventory WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Inventory::from))
    }

    async fn list(&self) -> Result<Vec<Inventory>, AppError> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            "SELECT id, name, price FROM inventory ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Inventory::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: InventoryPatch,
    ) -> Result<Option<Inventory>, AppError> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            UPDATE inventory SET
                name  = COALESCE($2::TEXT, name),
                price = COALESCE($3::NUMERIC, price)
            WHERE id = $1
            RETURNING id, name, price
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.price)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Inventory::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
