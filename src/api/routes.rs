//! API route table.
//!
//! Each method route carries its own policies: a rate limit (outermost) and/or
//! a response cache, applied as route layers so they only run for the route
//! they are declared on.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::api::handlers::{
    add_part_handler, assign_mechanic_handler, create_customer_handler, create_inventory_handler,
    create_mechanic_handler, create_ticket_handler, delete_customer_handler,
    delete_inventory_handler, delete_mechanic_handler, delete_ticket_handler,
    edit_mechanics_handler, get_customer_handler, get_inventory_handler, get_mechanic_handler,
    get_ticket_handler, list_customers_handler, list_inventory_handler, list_mechanics_handler,
    list_tickets_handler, login_handler, mechanic_ranking_handler, my_tickets_handler,
    remove_mechanic_handler, remove_part_handler, update_customer_handler,
    update_inventory_handler, update_mechanic_handler, update_ticket_handler,
};
use crate::api::middleware::auth;
use crate::api::middleware::rate_limit::{RateLimitPolicy as Policy, limit};
use crate::api::middleware::response_cache::{ITEM_TTL_SECS, LIST_TTL_SECS, cached};
use crate::state::AppState;

/// Resource routes with their rate-limit and cache policies.
///
/// # Endpoints
///
/// | Route | Limit | Cache |
/// |---|---|---|
/// | `POST /customers` | 5/day | |
/// | `GET /customers` | 3/hour | 30 s |
/// | `GET /customers/{id}` | | 60 s |
/// | `PUT /customers/{id}` | 5/month | |
/// | `DELETE /customers/{id}` | 5/day | |
/// | `POST /customers/login` | | |
/// | `GET /customers/my-tickets` (auth) | | |
/// | `POST /mechanics`, `POST /inventory` | 10/day | |
/// | `GET /mechanics`, `GET /inventory` | | 30 s |
/// | `GET /mechanics/{id}`, `GET /inventory/{id}`, `GET /mechanics/ranking` | | 60 s |
/// | `PUT /mechanics/{id}`, `PUT /inventory/{id}` | 10/month | |
/// | `DELETE /mechanics/{id}`, `DELETE /inventory/{id}` | 10/day | |
/// | `POST /service-tickets` | 20/day | |
/// | `GET /service-tickets` | | 30 s |
/// | `GET/PUT/DELETE /service-tickets/{id}` | | |
/// | `PUT /service-tickets/{id}/assign-mechanic/{mechanic_id}` | | |
/// | `PUT /service-tickets/{id}/remove-mechanic/{mechanic_id}` | | |
/// | `PUT /service-tickets/{id}/edit` | | |
/// | `PUT /service-tickets/{id}/add-part/{inventory_id}` | | |
/// | `PUT /service-tickets/{id}/remove-part/{inventory_id}` | | |
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let limits = &state.rate_limits;
    let cache = &state.cache;

    let customers = Router::new()
        .route(
            "/customers",
            limit(post(create_customer_handler), limits, Policy::CreateCustomer).merge(limit(
                cached(get(list_customers_handler), cache, LIST_TTL_SECS),
                limits,
                Policy::ListCustomers,
            )),
        )
        .route("/customers/login", post(login_handler))
        .route(
            "/customers/my-tickets",
            get(my_tickets_handler)
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .route(
            "/customers/{id}",
            cached(get(get_customer_handler), cache, ITEM_TTL_SECS)
                .merge(limit(
                    put(update_customer_handler),
                    limits,
                    Policy::UpdateCustomer,
                ))
                .merge(limit(
                    delete(delete_customer_handler),
                    limits,
                    Policy::DeleteCustomer,
                )),
        );

    let mechanics = Router::new()
        .route(
            "/mechanics",
            limit(post(create_mechanic_handler), limits, Policy::CreateMechanic)
                .merge(cached(get(list_mechanics_handler), cache, LIST_TTL_SECS)),
        )
        .route(
            "/mechanics/ranking",
            cached(get(mechanic_ranking_handler), cache, ITEM_TTL_SECS),
        )
        .route(
            "/mechanics/{id}",
            cached(get(get_mechanic_handler), cache, ITEM_TTL_SECS)
                .merge(limit(
                    put(update_mechanic_handler),
                    limits,
                    Policy::UpdateMechanic,
                ))
                .merge(limit(
                    delete(delete_mechanic_handler),
                    limits,
                    Policy::DeleteMechanic,
                )),
        );

    let inventory = Router::new()
        .route(
            "/inventory",
            limit(
                post(create_inventory_handler),
                limits,
                Policy::CreateInventory,
            )
            .merge(cached(get(list_inventory_handler), cache, LIST_TTL_SECS)),
        )
        .route(
            "/inventory/{id}",
            cached(get(get_inventory_handler), cache, ITEM_TTL_SECS)
                .merge(limit(
                    put(update_inventory_handler),
                    limits,
                    Policy::UpdateInventory,
                ))
                .merge(limit(
                    delete(delete_inventory_handler),
                    limits,
                    Policy::DeleteInventory,
                )),
        );

    let tickets = Router::new()
        .route(
            "/service-tickets",
            limit(post(create_ticket_handler), limits, Policy::CreateServiceTicket)
                .merge(cached(get(list_tickets_handler), cache, LIST_TTL_SECS)),
        )
        .route(
            "/service-tickets/{id}",
            get(get_ticket_handler)
                .put(update_ticket_handler)
                .delete(delete_ticket_handler),
        )
        .route(
            "/service-tickets/{id}/assign-mechanic/{mechanic_id}",
            put(assign_mechanic_handler),
        )
        .route(
            "/service-tickets/{id}/remove-mechanic/{mechanic_id}",
            put(remove_mechanic_handler),
        )
        .route("/service-tickets/{id}/edit", put(edit_mechanics_handler))
        .route(
            "/service-tickets/{id}/add-part/{inventory_id}",
            put(add_part_handler),
        )
        .route(
            "/service-tickets/{id}/remove-part/{inventory_id}",
            put(remove_part_handler),
        );

    Router::new()
        .merge(customers)
        .merge(mechanics)
        .merge(inventory)
        .merge(tickets)
}
