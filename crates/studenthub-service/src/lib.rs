//! # studenthub-service
//!
//! Business logic services for StudentHub. Each entity gets a service
//! that validates identifiers and business rules, delegates persistence
//! to its repository, and promotes a `None` lookup result to a domain
//! `NotFound` error. The transfer module maps student records to and from
//! spreadsheet rows for CSV/Excel import and export.

pub mod course;
pub mod enrollment;
pub mod faculty;
pub mod grade;
mod ident;
pub mod open_class;
pub mod program;
pub mod status;
pub mod student;
pub mod transcript;
pub mod transfer;
