//! Student domain entities.

pub mod gender;
pub mod identity;
pub mod model;

pub use gender::Gender;
pub use identity::IdentityDocument;
pub use model::{Address, CreateStudent, Student, UpdateStudent};
