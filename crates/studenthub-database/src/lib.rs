//! # studenthub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all StudentHub entities.
//!
//! Repositories share one contract: single-record lookups and conditional
//! mutations return `AppResult<Option<T>>`: absence is an expected
//! outcome here, and the service layer decides whether it becomes a
//! domain error. Store failures are wrapped as `ErrorKind::Database` with
//! an operation-identifying message.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
