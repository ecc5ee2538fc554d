//! Student entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::gender::Gender;
use super::identity::IdentityDocument;

/// A postal address block, stored as JSONB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street and house number.
    pub street: String,
    /// District.
    pub district: String,
    /// City or province.
    pub city: String,
    /// Country.
    pub country: String,
}

/// A registered student.
///
/// `faculty_id`, `program_id` and `status_id` are plain references with no
/// foreign-key constraint; the service layer checks them against active
/// records at write time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    /// Unique student identifier.
    pub id: Uuid,
    /// Unique student code (e.g. "SV001").
    pub code: String,
    /// Full name.
    pub full_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Reference to the faculty.
    pub faculty_id: Uuid,
    /// Reference to the study program.
    pub program_id: Uuid,
    /// Reference to the student status.
    pub status_id: Uuid,
    /// Year the student entered the program.
    pub cohort_year: i32,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Nationality.
    pub nationality: String,
    /// Permanent address.
    pub address: Option<Json<Address>>,
    /// Identity document (CMND / CCCD / passport).
    pub identity_document: Option<Json<IdentityDocument>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; null means the record is active.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a new student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudent {
    /// Unique student code.
    pub code: String,
    /// Full name.
    pub full_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Faculty reference.
    pub faculty_id: Uuid,
    /// Program reference.
    pub program_id: Uuid,
    /// Status reference.
    pub status_id: Uuid,
    /// Cohort year.
    pub cohort_year: i32,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Nationality.
    pub nationality: String,
    /// Permanent address.
    pub address: Option<Address>,
    /// Identity document.
    pub identity_document: Option<IdentityDocument>,
}

/// Partial update of a student; only provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudent {
    /// New full name.
    pub full_name: Option<String>,
    /// New date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// New gender.
    pub gender: Option<Gender>,
    /// New faculty reference.
    pub faculty_id: Option<Uuid>,
    /// New program reference.
    pub program_id: Option<Uuid>,
    /// New status reference.
    pub status_id: Option<Uuid>,
    /// New cohort year.
    pub cohort_year: Option<i32>,
    /// New email.
    pub email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New nationality.
    pub nationality: Option<String>,
    /// New address.
    pub address: Option<Address>,
    /// New identity document.
    pub identity_document: Option<IdentityDocument>,
}

impl UpdateStudent {
    /// Whether the patch carries no fields at all.
    ///
    /// An empty patch is a documented no-op: the stored record is returned
    /// unchanged and `updated_at` is not refreshed.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.faculty_id.is_none()
            && self.program_id.is_none()
            && self.status_id.is_none()
            && self.cohort_year.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.nationality.is_none()
            && self.address.is_none()
            && self.identity_document.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_detection() {
        assert!(UpdateStudent::default().is_empty());

        let patch = UpdateStudent {
            email: Some("a@b.edu.vn".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
