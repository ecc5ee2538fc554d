//! # studenthub-api
//!
//! HTTP API layer for StudentHub built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, logging, compression,
//! body limits), extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
