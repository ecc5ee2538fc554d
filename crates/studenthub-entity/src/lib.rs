//! # studenthub-entity
//!
//! Domain entity models for StudentHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! Every table-backed entity carries `created_at` / `updated_at`
//! timestamps and an optional `deleted_at` soft-delete marker: a record is
//! *active* iff `deleted_at` is null, and the repositories scope every
//! query to active records.

pub mod course;
pub mod enrollment;
pub mod faculty;
pub mod grade;
pub mod localized;
pub mod open_class;
pub mod program;
pub mod status;
pub mod student;
pub mod transcript;

pub use localized::LocalizedName;
