//! Student status entity model.
//!
//! Statuses ("Đang học", "Bảo lưu", "Đã tốt nghiệp", ...) are data, not a
//! hardcoded enum, so administrators can add new ones without a deploy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::localized::LocalizedName;

/// A configurable student status.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentStatus {
    /// Unique status identifier.
    pub id: Uuid,
    /// Unique status code.
    pub code: String,
    /// Bilingual display name.
    pub name: Json<LocalizedName>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; null means the record is active.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a new status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentStatus {
    /// Unique status code.
    pub code: String,
    /// Bilingual display name.
    pub name: LocalizedName,
}

/// Partial update of a status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudentStatus {
    /// New status code.
    pub code: Option<String>,
    /// New display name.
    pub name: Option<LocalizedName>,
}

impl UpdateStudentStatus {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.name.is_none()
    }
}
