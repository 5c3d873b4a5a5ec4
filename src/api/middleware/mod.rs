//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, per-route rate limiting and response caching,
//! content-type enforcement, and observability middleware.

pub mod auth;
pub mod content_type;
pub mod rate_limit;
pub mod response_cache;
pub mod tracing;
