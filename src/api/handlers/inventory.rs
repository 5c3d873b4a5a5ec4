//! Handlers for inventory endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::MessageResponse;
use crate::api::dto::inventory::{
    CreateInventoryRequest, InventoryResponse, UpdateInventoryRequest,
};
use crate::api::extract::{ApiJson, ApiPath};
use crate::error::AppError;
use crate::state::AppState;

/// # Endpoint
///
/// `POST /inventory`
///
/// # Request Body
///
/// ```json
/// { "name": "Oil filter", "price": 12.5 }
/// ```
pub async fn create_inventory_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateInventoryRequest>,
) -> Result<(StatusCode, Json<InventoryResponse>), AppError> {
    let new_item = payload.validated()?;

    let item = state.inventory_service.create(new_item).await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn list_inventory_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryResponse>>, AppError> {
    let items = state.inventory_service.list().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub async fn get_inventory_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<InventoryResponse>, AppError> {
    let item = state.inventory_service.get(id).await?;
    Ok(Json(item.into()))
}

pub async fn update_inventory_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateInventoryRequest>,
) -> Result<Json<InventoryResponse>, AppError> {
    let patch = payload.validated()?;

    let item = state.inventory_service.update(id, patch).await?;

    Ok(Json(item.into()))
}

pub async fn delete_inventory_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.inventory_service.delete(id).await?;
    Ok(Json(MessageResponse::deleted("Inventory item", id)))
}
