//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::api::middleware::rate_limit::RateLimits;
use crate::application::services::{
    AuthService, CustomerService, InventoryService, MechanicService, ServiceTicketService,
};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgCustomerRepository, PgInventoryRepository, PgMechanicRepository, PgServiceTicketRepository,
};

pub type TicketService = ServiceTicketService<
    PgServiceTicketRepository,
    PgCustomerRepository,
    PgMechanicRepository,
    PgInventoryRepository,
>;

/// Settings that shape [`AppState`] but are not services themselves.
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub rate_limit_enabled: bool,
    pub behind_proxy: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub customer_service: Arc<CustomerService<PgCustomerRepository>>,
    pub mechanic_service: Arc<MechanicService<PgMechanicRepository>>,
    pub ticket_service: Arc<TicketService>,
    pub inventory_service: Arc<InventoryService<PgInventoryRepository>>,
    pub auth_service: Arc<AuthService<PgCustomerRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub rate_limits: Arc<RateLimits>,
}

impl AppState {
    /// Wires repositories and services over one connection pool.
    pub fn new(pool: Arc<PgPool>, cache: Arc<dyn CacheService>, settings: StateSettings) -> Self {
        let customer_repository = Arc::new(PgCustomerRepository::new(pool.clone()));
        let mechanic_repository = Arc::new(PgMechanicRepository::new(pool.clone()));
        let inventory_repository = Arc::new(PgInventoryRepository::new(pool.clone()));
        let ticket_repository = Arc::new(PgServiceTicketRepository::new(pool.clone()));

        Self {
            customer_service: Arc::new(CustomerService::new(
                customer_repository.clone(),
                settings.bcrypt_cost,
            )),
            mechanic_service: Arc::new(MechanicService::new(mechanic_repository.clone())),
            ticket_service: Arc::new(ServiceTicketService::new(
                ticket_repository,
                customer_repository.clone(),
                mechanic_repository,
                inventory_repository.clone(),
            )),
            inventory_service: Arc::new(InventoryService::new(inventory_repository)),
            auth_service: Arc::new(
                AuthService::new(
                    customer_repository,
                    settings.jwt_secret,
                    settings.jwt_ttl_hours,
                )
                .with_bcrypt_cost(settings.bcrypt_cost),
            ),
            cache,
            rate_limits: Arc::new(RateLimits::new(
                settings.rate_limit_enabled,
                settings.behind_proxy,
            )),
            db: pool,
        }
    }
}
