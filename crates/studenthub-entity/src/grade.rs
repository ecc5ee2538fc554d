//! Grade entity model and score conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recorded score for a student in a class.
///
/// Scores are on the 10-point scale; the letter grade and 4-point value
/// are derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Grade {
    /// Unique grade identifier.
    pub id: Uuid,
    /// Graded student.
    pub student_id: Uuid,
    /// Class the score was earned in.
    pub class_id: Uuid,
    /// Score on the 10-point scale.
    pub score: f64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; null means the record is active.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to record a new grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGrade {
    /// Graded student.
    pub student_id: Uuid,
    /// Class the score was earned in.
    pub class_id: Uuid,
    /// Score on the 10-point scale.
    pub score: f64,
}

/// Partial update of a grade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGrade {
    /// Corrected score.
    pub score: Option<f64>,
}

impl UpdateGrade {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.score.is_none()
    }
}

/// Convert a 10-point score to its letter grade.
pub fn letter_grade(score: f64) -> &'static str {
    if score >= 8.5 {
        "A"
    } else if score >= 7.0 {
        "B"
    } else if score >= 5.5 {
        "C"
    } else if score >= 4.0 {
        "D"
    } else {
        "F"
    }
}

/// Convert a 10-point score to its 4-point grade value.
pub fn grade_points(score: f64) -> f64 {
    if score >= 8.5 {
        4.0
    } else if score >= 7.0 {
        3.0
    } else if score >= 5.5 {
        2.0
    } else if score >= 4.0 {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(letter_grade(10.0), "A");
        assert_eq!(letter_grade(8.5), "A");
        assert_eq!(letter_grade(8.4), "B");
        assert_eq!(letter_grade(7.0), "B");
        assert_eq!(letter_grade(5.5), "C");
        assert_eq!(letter_grade(4.0), "D");
        assert_eq!(letter_grade(3.9), "F");
        assert_eq!(letter_grade(0.0), "F");
    }

    #[test]
    fn test_grade_points_track_letters() {
        for (score, points) in [(9.0, 4.0), (7.5, 3.0), (6.0, 2.0), (4.5, 1.0), (2.0, 0.0)] {
            assert_eq!(grade_points(score), points, "score {score}");
        }
    }
}
