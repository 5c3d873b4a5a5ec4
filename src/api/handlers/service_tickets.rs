//! Handlers for service tickets and their mechanic/part associations.
//!
//! Association endpoints answer with the ticket as it is after the change.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::MessageResponse;
use crate::api::dto::service_ticket::{
    CreateServiceTicketRequest, EditMechanicsRequest, ServiceTicketResponse,
    UpdateServiceTicketRequest,
};
use crate::api::extract::{ApiJson, ApiPath};
use crate::error::AppError;
use crate::state::AppState;

type TicketResult = Result<Json<ServiceTicketResponse>, AppError>;

/// Opens a ticket.
///
/// # Endpoint
///
/// `POST /service-tickets`
///
/// # Request Body
///
/// ```json
/// { "service_date": "2024-01-15", "customer_id": 1 }
/// ```
///
/// # Errors
///
/// Returns 400 (not 404) if `customer_id` references no customer.
pub async fn create_ticket_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateServiceTicketRequest>,
) -> Result<(StatusCode, Json<ServiceTicketResponse>), AppError> {
    let new_ticket = payload.validated()?;

    let ticket = state.ticket_service.create(new_ticket).await?;

    Ok((StatusCode::CREATED, Json(ticket.into())))
}

pub async fn list_tickets_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceTicketResponse>>, AppError> {
    let tickets = state.ticket_service.list().await?;
    Ok(Json(tickets.into_iter().map(Into::into).collect()))
}

pub async fn get_ticket_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> TicketResult {
    Ok(Json(state.ticket_service.get(id).await?.into()))
}

pub async fn update_ticket_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateServiceTicketRequest>,
) -> TicketResult {
    let ticket = state.ticket_service.update(id, payload.into()).await?;
    Ok(Json(ticket.into()))
}

/// Deletes a ticket; assigned mechanics and parts are kept.
///
/// # Endpoint
///
/// `DELETE /service-tickets/{id}`
pub async fn delete_ticket_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.ticket_service.delete(id).await?;
    Ok(Json(MessageResponse::deleted("Service ticket", id)))
}

/// # Endpoint
///
/// `PUT /service-tickets/{ticket_id}/assign-mechanic/{mechanic_id}`
///
/// Idempotent. Returns 404 if the ticket or mechanic does not exist.
pub async fn assign_mechanic_handler(
    State(state): State<AppState>,
    ApiPath((ticket_id, mechanic_id)): ApiPath<(i64, i64)>,
) -> TicketResult {
    let ticket = state
        .ticket_service
        .assign_mechanic(ticket_id, mechanic_id)
        .await?;
    Ok(Json(ticket.into()))
}

/// # Endpoint
///
/// `PUT /service-tickets/{ticket_id}/remove-mechanic/{mechanic_id}`
///
/// Removing a mechanic that is not assigned is a no-op.
pub async fn remove_mechanic_handler(
    State(state): State<AppState>,
    ApiPath((ticket_id, mechanic_id)): ApiPath<(i64, i64)>,
) -> TicketResult {
    let ticket = state
        .ticket_service
        .remove_mechanic(ticket_id, mechanic_id)
        .await?;
    Ok(Json(ticket.into()))
}

/// Adds and removes several mechanics at once.
///
/// # Endpoint
///
/// `PUT /service-tickets/{ticket_id}/edit`
///
/// # Request Body
///
/// ```json
/// { "add_ids": [1, 2], "remove_ids": [3] }
/// ```
///
/// Unknown mechanic ids are skipped. An id listed in both ends up removed.
pub async fn edit_mechanics_handler(
    State(state): State<AppState>,
    ApiPath(ticket_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<EditMechanicsRequest>,
) -> TicketResult {
    let ticket = state
        .ticket_service
        .edit_mechanics(ticket_id, payload.into())
        .await?;
    Ok(Json(ticket.into()))
}

/// # Endpoint
///
/// `PUT /service-tickets/{ticket_id}/add-part/{inventory_id}`
pub async fn add_part_handler(
    State(state): State<AppState>,
    ApiPath((ticket_id, inventory_id)): ApiPath<(i64, i64)>,
) -> TicketResult {
    let ticket = state.ticket_service.add_part(ticket_id, inventory_id).await?;
    Ok(Json(ticket.into()))
}

/// # Endpoint
///
/// `PUT /service-tickets/{ticket_id}/remove-part/{inventory_id}`
pub async fn remove_part_handler(
    State(state): State<AppState>,
    ApiPath((ticket_id, inventory_id)): ApiPath<(i64, i64)>,
) -> TicketResult {
    let ticket = state
        .ticket_service
        .remove_part(ticket_id, inventory_id)
        .await?;
    Ok(Json(ticket.into()))
}
