//! Grade recording service.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_database::repositories::enrollment::EnrollmentRepository;
use studenthub_database::repositories::grade::GradeRepository;
use studenthub_entity::grade::{CreateGrade, Grade, UpdateGrade};

use crate::ident;

/// Handles grade CRUD.
#[derive(Debug, Clone)]
pub struct GradeService {
    repo: Arc<GradeRepository>,
    enrollments: Arc<EnrollmentRepository>,
}

impl GradeService {
    /// Creates a new grade service.
    pub fn new(repo: Arc<GradeRepository>, enrollments: Arc<EnrollmentRepository>) -> Self {
        Self { repo, enrollments }
    }

    /// Records a score for a student in a class.
    ///
    /// The student must hold an active enrollment in the class and may
    /// have at most one active grade per class.
    pub async fn create(&self, data: CreateGrade) -> AppResult<Grade> {
        validate_score(data.score)?;

        if self
            .enrollments
            .find_by_student_and_class(data.student_id, data.class_id)
            .await?
            .is_none()
        {
            return Err(AppError::validation(format!(
                "Student {} is not enrolled in class {}",
                data.student_id, data.class_id
            )));
        }
        if self
            .repo
            .find_by_student_and_class(data.student_id, data.class_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Student {} already has a grade for class {}",
                data.student_id, data.class_id
            )));
        }

        let grade = self
            .repo
            .create(&data)
            .await
            .inspect_err(|e| error!(student_id = %data.student_id, "Failed to record grade: {e}"))?;

        info!(
            grade_id = %grade.id,
            student_id = %grade.student_id,
            score = grade.score,
            "Grade recorded"
        );
        Ok(grade)
    }

    /// Lists grades, optionally scoped to one student.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        student_id: Option<Uuid>,
    ) -> AppResult<PageResponse<Grade>> {
        let mut filter = SearchFilter::new();
        if let Some(student_id) = student_id {
            filter = filter.exact_uuid("student_id", student_id);
        }
        self.repo.find_all(page, &filter).await
    }

    /// Lists every active grade.
    pub async fn list_all(&self) -> AppResult<Vec<Grade>> {
        self.repo.list_all().await
    }

    /// Gets a grade by id, rejecting malformed ids early.
    pub async fn get(&self, raw_id: &str) -> AppResult<Grade> {
        let id = ident::parse_id(raw_id, "grade")?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Grade {id} not found")))
    }

    /// Corrects a recorded score. An empty patch returns the stored
    /// record unchanged.
    pub async fn update(&self, raw_id: &str, patch: UpdateGrade) -> AppResult<Grade> {
        let id = ident::parse_id(raw_id, "grade")?;
        if patch.is_empty() {
            return self.get(raw_id).await;
        }
        if let Some(score) = patch.score {
            validate_score(score)?;
        }

        let grade = self
            .repo
            .update(id, &patch)
            .await
            .inspect_err(|e| error!(grade_id = %id, "Failed to update grade: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Grade {id} not found")))?;

        info!(grade_id = %grade.id, score = grade.score, "Grade updated");
        Ok(grade)
    }

    /// Soft-deletes a grade.
    pub async fn delete(&self, raw_id: &str) -> AppResult<Grade> {
        let id = ident::parse_id(raw_id, "grade")?;
        let grade = self
            .repo
            .soft_delete(id)
            .await
            .inspect_err(|e| error!(grade_id = %id, "Failed to delete grade: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Grade {id} not found")))?;

        info!(grade_id = %grade.id, "Grade deleted");
        Ok(grade)
    }
}

/// Scores live on the 10-point scale.
fn validate_score(score: f64) -> AppResult<()> {
    if !(0.0..=10.0).contains(&score) || !score.is_finite() {
        return Err(AppError::validation(format!(
            "Score must be between 0 and 10, got {score}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(validate_score(0.0).is_ok());
        assert!(validate_score(10.0).is_ok());
        assert!(validate_score(7.5).is_ok());
        assert!(validate_score(-0.1).is_err());
        assert!(validate_score(10.1).is_err());
        assert!(validate_score(f64::NAN).is_err());
    }
}
