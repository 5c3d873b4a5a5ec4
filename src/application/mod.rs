//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::customer_service::CustomerService`] - Customer registration and pagination
//! - [`services::mechanic_service::MechanicService`] - Mechanics and ticket-count ranking
//! - [`services::service_ticket_service::ServiceTicketService`] - Tickets and their associations
//! - [`services::inventory_service::InventoryService`] - Parts
//! - [`services::auth_service::AuthService`] - Customer login and JWT verification

pub mod services;
