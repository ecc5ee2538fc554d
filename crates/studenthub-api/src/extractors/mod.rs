//! Custom query parameter types.

pub mod pagination;

pub use pagination::ListParams;
