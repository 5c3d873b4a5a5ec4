//! Handlers for mechanic endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::MessageResponse;
use crate::api::dto::mechanic::{
    CreateMechanicRequest, MechanicResponse, RankedMechanicResponse, UpdateMechanicRequest,
};
use crate::api::extract::{ApiJson, ApiPath};
use crate::error::AppError;
use crate::state::AppState;

/// # Endpoint
///
/// `POST /mechanics`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Bob",
///   "email": "bob@shop.com",
///   "specialization": "Brakes",
///   "experience": 5
/// }
/// ```
pub async fn create_mechanic_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateMechanicRequest>,
) -> Result<(StatusCode, Json<MechanicResponse>), AppError> {
    let new_mechanic = payload.validated()?;

    let mechanic = state.mechanic_service.create(new_mechanic).await?;

    Ok((StatusCode::CREATED, Json(mechanic.into())))
}

pub async fn list_mechanics_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MechanicResponse>>, AppError> {
    let mechanics = state.mechanic_service.list().await?;
    Ok(Json(mechanics.into_iter().map(Into::into).collect()))
}

pub async fn get_mechanic_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MechanicResponse>, AppError> {
    let mechanic = state.mechanic_service.get(id).await?;
    Ok(Json(mechanic.into()))
}

pub async fn update_mechanic_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateMechanicRequest>,
) -> Result<Json<MechanicResponse>, AppError> {
    let patch = payload.validated()?;

    let mechanic = state.mechanic_service.update(id, patch).await?;

    Ok(Json(mechanic.into()))
}

pub async fn delete_mechanic_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.mechanic_service.delete(id).await?;
    Ok(Json(MessageResponse::deleted("Mechanic", id)))
}

/// Mechanics ordered by the number of tickets they worked on.
///
/// # Endpoint
///
/// `GET /mechanics/ranking`
///
/// # Response
///
/// Mechanics without tickets are included with `ticket_count: 0`.
///
/// ```json
/// [
///   { "id": 2, "name": "Bob", "email": "bob@shop.com", "specialization": "Brakes", "experience": 5, "ticket_count": 3 },
///   { "id": 1, "name": "Ann", "email": "ann@shop.com", "specialization": "Engines", "experience": 9, "ticket_count": 0 }
/// ]
/// ```
pub async fn mechanic_ranking_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RankedMechanicResponse>>, AppError> {
    let ranking = state.mechanic_service.ranking().await?;
    Ok(Json(ranking.into_iter().map(Into::into).collect()))
}
