//! HTTP API layer for Keygate.
//!
//! Provides REST endpoints for key administration and the API key protected demo.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
