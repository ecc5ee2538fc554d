//! Open class entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A class section opened for a course in a given semester.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OpenClass {
    /// Unique class identifier.
    pub id: Uuid,
    /// Unique class code (e.g. "CS101-01").
    pub code: String,
    /// Course this class teaches.
    pub course_id: Uuid,
    /// Academic year (e.g. "2024-2025").
    pub academic_year: String,
    /// Semester within the year (1, 2 or 3 for summer).
    pub semester: i16,
    /// Lecturer name.
    pub lecturer: String,
    /// Maximum number of enrolled students.
    pub max_capacity: i32,
    /// Weekly schedule (free-form, e.g. "Mon 7:30-9:30").
    pub schedule: String,
    /// Room.
    pub room: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; null means the record is active.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to open a new class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOpenClass {
    /// Unique class code.
    pub code: String,
    /// Course this class teaches.
    pub course_id: Uuid,
    /// Academic year.
    pub academic_year: String,
    /// Semester within the year.
    pub semester: i16,
    /// Lecturer name.
    pub lecturer: String,
    /// Maximum number of enrolled students.
    pub max_capacity: i32,
    /// Weekly schedule.
    pub schedule: String,
    /// Room.
    pub room: String,
}

/// Partial update of an open class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOpenClass {
    /// New lecturer.
    pub lecturer: Option<String>,
    /// New capacity.
    pub max_capacity: Option<i32>,
    /// New schedule.
    pub schedule: Option<String>,
    /// New room.
    pub room: Option<String>,
}

impl UpdateOpenClass {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.lecturer.is_none()
            && self.max_capacity.is_none()
            && self.schedule.is_none()
            && self.room.is_none()
    }
}
