//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into domain operations and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`extract`] - JSON body and path extractors with JSON error bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, rate limiting, caching and content-type middleware
//! - [`routes`] - Route table with per-route policies

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
