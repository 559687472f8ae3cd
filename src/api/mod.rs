//! REST API layer for HTTP request/response handling.
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing, CORS and security header layers
//! - [`routes`] - Link management route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
