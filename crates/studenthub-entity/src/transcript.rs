//! Transcript entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// One line of a transcript: a completed course and its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRow {
    /// Course code.
    pub course_code: String,
    /// Course display name.
    pub course_name: String,
    /// Credits the course carries.
    pub credits: i16,
    /// Score on the 10-point scale.
    pub score: f64,
    /// Derived letter grade.
    pub letter: String,
    /// Derived 4-point value.
    pub points: f64,
}

/// A compiled transcript snapshot for a student.
///
/// Compiled from the student's grades on demand; recompiling replaces the
/// stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transcript {
    /// Unique transcript identifier.
    pub id: Uuid,
    /// Student the transcript belongs to.
    pub student_id: Uuid,
    /// Per-course result rows.
    pub rows: Json<Vec<TranscriptRow>>,
    /// Credit-weighted grade point average on the 4-point scale.
    pub gpa: f64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; null means the record is active.
    pub deleted_at: Option<DateTime<Utc>>,
}
