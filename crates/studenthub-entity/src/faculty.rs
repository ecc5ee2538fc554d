//! Faculty entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::localized::LocalizedName;

/// A faculty, addressed by a short code (e.g. "CNTT", Công Nghệ Thông Tin).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: Uuid,
    /// Unique faculty code.
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

/// Data required to create a new faculty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFaculty {
    /// Unique faculty code.
    pub code: String,
    /// Bilingual display name.
    pub name: LocalizedName,
}

/// Partial update of a faculty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFaculty {
    /// New faculty code.
    pub code: Option<String>,
    /// New display name.
    pub name: Option<LocalizedName>,
}

impl UpdateFaculty {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.name.is_none()
    }
}
