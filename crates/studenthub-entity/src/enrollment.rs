//! Enrollment entity model.
//!
//! Cancelling an enrollment is a soft delete: `deleted_at` is set and the
//! reason recorded, so the registration history survives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A student's registration in an open class.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    /// Unique enrollment identifier.
    pub id: Uuid,
    /// Enrolled student.
    pub student_id: Uuid,
    /// Class enrolled in.
    pub class_id: Uuid,
    /// Reason given when the enrollment was cancelled.
    pub canceled_reason: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; null means the enrollment is active.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a new enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnrollment {
    /// Enrolling student.
    pub student_id: Uuid,
    /// Class to enroll in.
    pub class_id: Uuid,
}
