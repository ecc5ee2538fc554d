//! Course entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::localized::LocalizedName;

/// Minimum number of credits a course must carry.
pub const MIN_CREDITS: i16 = 2;

/// A course in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    /// Unique course identifier.
    pub id: Uuid,
    /// Unique course code (e.g. "CS101").
    pub code: String,
    /// Bilingual display name.
    pub name: Json<LocalizedName>,
    /// Number of credits (at least [`MIN_CREDITS`]).
    pub credits: i16,
    /// Faculty offering the course.
    pub faculty_id: Uuid,
    /// Course description.
    pub description: Option<String>,
    /// Course that must be passed before enrolling, if any.
    pub prerequisite_course_id: Option<Uuid>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; null means the record is active.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    /// Unique course code.
    pub code: String,
    /// Bilingual display name.
    pub name: LocalizedName,
    /// Number of credits.
    pub credits: i16,
    /// Faculty offering the course.
    pub faculty_id: Uuid,
    /// Course description.
    pub description: Option<String>,
    /// Prerequisite course, if any.
    pub prerequisite_course_id: Option<Uuid>,
}

/// Partial update of a course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourse {
    /// New display name.
    pub name: Option<LocalizedName>,
    /// New credit count.
    pub credits: Option<i16>,
    /// New faculty reference.
    pub faculty_id: Option<Uuid>,
    /// New description.
    pub description: Option<String>,
}

impl UpdateCourse {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.credits.is_none()
            && self.faculty_id.is_none()
            && self.description.is_none()
    }
}
