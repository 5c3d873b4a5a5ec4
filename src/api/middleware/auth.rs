//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Identity attached to requests that passed [`layer`].
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedCustomer {
    pub customer_id: i64,
}

/// Authenticates requests using customer JWTs from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// The `Bearer ` prefix is optional.
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify signature and expiry
/// 3. Check that the customer still exists
/// 4. Insert [`AuthenticatedCustomer`] into request extensions
/// 5. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) before the
/// handler runs if:
/// - Authorization header is missing
/// - Token is malformed, tampered with or expired
/// - The customer was deleted
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/customers/my-tickets", get(my_tickets_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let customer_id = st.auth_service.authenticate(header.as_deref()).await?;

    req.extensions_mut()
        .insert(AuthenticatedCustomer { customer_id });

    Ok(next.run(req).await)
}
