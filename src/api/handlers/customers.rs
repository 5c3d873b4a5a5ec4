//! Handlers for customer endpoints, login, and the customer's own tickets.

use axum::{
    Extension, Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};

use crate::api::dto::MessageResponse;
use crate::api::dto::auth::{LoginRequest, TokenResponse};
use crate::api::dto::customer::{
    CreateCustomerRequest, CustomerListResponse, CustomerResponse, UpdateCustomerRequest,
};
use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::service_ticket::ServiceTicketResponse;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::middleware::auth::AuthenticatedCustomer;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a customer.
///
/// # Endpoint
///
/// `POST /customers`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "John",
///   "email": "john@test.com",
///   "dob": "1990-05-01",      // optional
///   "password": "secret123"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 with a field map if a field is missing or invalid, or with
/// `{"error": "Email already associated with an account."}` on a duplicate.
pub async fn create_customer_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    let registration = payload.validated()?;

    let customer = state.customer_service.create(registration).await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Lists customers one page at a time.
///
/// # Endpoint
///
/// `GET /customers?page=1&per_page=10`
///
/// # Response
///
/// ```json
/// {
///   "customers": [ ... ],
///   "total": 21,
///   "pages": 3,
///   "current_page": 1,
///   "per_page": 10
/// }
/// ```
pub async fn list_customers_handler(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<CustomerListResponse>, AppError> {
    let Query(params) = query?;
    let (page, per_page) = params.resolve()?;

    let page = state
        .customer_service
        .list_paginated(page, per_page)
        .await?;

    Ok(Json(page.into()))
}

/// # Endpoint
///
/// `GET /customers/{id}`
pub async fn get_customer_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = state.customer_service.get(id).await?;
    Ok(Json(customer.into()))
}

/// Partially updates a customer.
///
/// # Endpoint
///
/// `PUT /customers/{id}`
///
/// Absent keys keep their value; `"dob": null` clears the date of birth.
/// A new password is re-hashed.
///
/// # Errors
///
/// Returns 404 if the customer does not exist, 400 on validation errors or
/// when the new email belongs to another customer.
pub async fn update_customer_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    let changes = payload.validated()?;

    let customer = state.customer_service.update(id, changes).await?;

    Ok(Json(customer.into()))
}

/// Deletes a customer and all of their service tickets.
///
/// # Endpoint
///
/// `DELETE /customers/{id}`
pub async fn delete_customer_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.customer_service.delete(id).await?;
    Ok(Json(MessageResponse::deleted("Customer", id)))
}

/// Exchanges credentials for a token.
///
/// # Endpoint
///
/// `POST /customers/login`
///
/// # Errors
///
/// Returns 401 `"Invalid email or password."` for an unknown email and for a
/// wrong password alike.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let credentials = payload.validated()?;

    let token = state
        .auth_service
        .login(&credentials.email, credentials.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// Tickets owned by the authenticated customer.
///
/// # Endpoint
///
/// `GET /customers/my-tickets` (requires `Authorization: Bearer <token>`)
pub async fn my_tickets_handler(
    State(state): State<AppState>,
    Extension(customer): Extension<AuthenticatedCustomer>,
) -> Result<Json<Vec<ServiceTicketResponse>>, AppError> {
    let tickets = state
        .ticket_service
        .list_for_customer(customer.customer_id)
        .await?;

    Ok(Json(tickets.into_iter().map(Into::into).collect()))
}
