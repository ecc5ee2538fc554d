//! Student domain services.

pub mod service;

pub use service::{StudentListQuery, StudentService};
