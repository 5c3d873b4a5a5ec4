//! Domain entity representing a part kept in inventory.

use rust_decimal::Decimal;

/// A part that can be attached to service tickets.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

impl Inventory {
    pub fn new(id: i64, name: String, price: Decimal) -> Self {
        Self { id, name, price }
    }
}

/// Input data for creating an inventory item.
#[derive(Debug, Clone)]
pub struct NewInventory {
    pub name: String,
    pub price: Decimal,
}

/// Partial update of an inventory item.
#[derive(Debug, Clone, Default)]
pub struct InventoryPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}
