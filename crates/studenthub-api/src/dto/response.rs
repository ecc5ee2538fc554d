//! Response DTOs.
//!
//! Entities serialize directly; list endpoints use the `{data, meta}`
//! envelope from `studenthub_core`. Only the handful of non-entity
//! responses live here.

use serde::{Deserialize, Serialize};

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the database answered.
    pub database: bool,
}
