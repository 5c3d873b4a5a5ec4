//! DTOs for inventory endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::limits::{fits_price, fits_text};

use crate::domain::entities::{Inventory, InventoryPatch, NewInventory};
use crate::error::AppError;

/// Request body for `POST /inventory`.
///
/// `price` arrives as a JSON number and is stored with two decimal places.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInventoryRequest {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, message = "Shorter than minimum length 1."),
        custom(function = "fits_text")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Missing data for required field."),
        range(min = 0.0, message = "Must be greater than or equal to 0."),
        custom(function = "fits_price")
    )]
    pub price: Option<f64>,
}

impl CreateInventoryRequest {
    pub fn validated(self) -> Result<NewInventory, AppError> {
        self.validate()?;

        Ok(NewInventory {
            name: self.name.unwrap_or_default(),
            price: to_price(self.price.unwrap_or_default())?,
        })
    }
}

/// Request body for `PUT /inventory/{id}`. Only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInventoryRequest {
    #[validate(
        length(min = 1, message = "Shorter than minimum length 1."),
        custom(function = "fits_text")
    )]
    pub name: Option<String>,

    #[validate(
        range(min = 0.0, message = "Must be greater than or equal to 0."),
        custom(function = "fits_price")
    )]
    pub price: Option<f64>,
}

impl UpdateInventoryRequest {
    pub fn validated(self) -> Result<InventoryPatch, AppError> {
        self.validate()?;

        Ok(InventoryPatch {
            name: self.name,
            price: self.price.map(to_price).transpose()?,
        })
    }
}

fn to_price(value: f64) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| AppError::invalid_field("price", "Not a valid number."))
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<Inventory> for InventoryResponse {
    fn from(item: Inventory) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
        }
    }
}
