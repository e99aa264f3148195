//! # homeaway-api
//!
//! HTTP API layer for HomeAway built on Axum.
//!
//! Provides the REST endpoints, the session and form extractors, the
//! mapping from action outcomes and application errors to HTTP
//! responses, and the middleware stack (request logging, CORS,
//! compression, body limit).

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod outcome;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
