//! Enrollment service.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_database::repositories::enrollment::EnrollmentRepository;
use studenthub_database::repositories::open_class::OpenClassRepository;
use studenthub_database::repositories::student::StudentRepository;
use studenthub_entity::enrollment::{CreateEnrollment, Enrollment};

use crate::ident;

/// Handles class registration and cancellation.
#[derive(Debug, Clone)]
pub struct EnrollmentService {
    repo: Arc<EnrollmentRepository>,
    students: Arc<StudentRepository>,
    classes: Arc<OpenClassRepository>,
}

impl EnrollmentService {
    /// Creates a new enrollment service.
    pub fn new(
        repo: Arc<EnrollmentRepository>,
        students: Arc<StudentRepository>,
        classes: Arc<OpenClassRepository>,
    ) -> Self {
        Self {
            repo,
            students,
            classes,
        }
    }

    /// Enrolls a student in a class.
    ///
    /// The student and class must be active, the student must not already
    /// hold an active enrollment in the class, and the class must have a
    /// free seat. The capacity check is a read-then-write without
    /// serialization, so two simultaneous registrations for the last seat
    /// can both pass it; per-row atomicity is the only guarantee.
    pub async fn create(&self, data: CreateEnrollment) -> AppResult<Enrollment> {
        if self.students.find_by_id(data.student_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Unknown student {}",
                data.student_id
            )));
        }
        let class = self
            .classes
            .find_by_id(data.class_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Unknown class {}", data.class_id)))?;

        if self
            .repo
            .find_by_student_and_class(data.student_id, data.class_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Student {} is already enrolled in class {}",
                data.student_id, class.code
            )));
        }

        let enrolled = self.repo.count_by_class(data.class_id).await?;
        if enrolled >= class.max_capacity as u64 {
            return Err(AppError::conflict(format!(
                "Class {} is full ({} / {})",
                class.code, enrolled, class.max_capacity
            )));
        }

        let enrollment = self
            .repo
            .create(&data)
            .await
            .inspect_err(|e| error!(student_id = %data.student_id, "Failed to enroll: {e}"))?;

        info!(
            enrollment_id = %enrollment.id,
            student_id = %enrollment.student_id,
            class = %class.code,
            "Student enrolled"
        );
        Ok(enrollment)
    }

    /// Lists enrollments, optionally scoped to one student.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        student_id: Option<Uuid>,
    ) -> AppResult<PageResponse<Enrollment>> {
        let mut filter = SearchFilter::new();
        if let Some(student_id) = student_id {
            filter = filter.exact_uuid("student_id", student_id);
        }
        self.repo.find_all(page, &filter).await
    }

    /// Lists every active enrollment.
    pub async fn list_all(&self) -> AppResult<Vec<Enrollment>> {
        self.repo.list_all().await
    }

    /// Gets an enrollment by id, rejecting malformed ids early.
    pub async fn get(&self, raw_id: &str) -> AppResult<Enrollment> {
        let id = ident::parse_id(raw_id, "enrollment")?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Enrollment {id} not found")))
    }

    /// Cancels an active enrollment, recording the reason.
    pub async fn cancel(&self, raw_id: &str, reason: Option<String>) -> AppResult<Enrollment> {
        let id = ident::parse_id(raw_id, "enrollment")?;
        let enrollment = self
            .repo
            .cancel(id, reason.as_deref())
            .await
            .inspect_err(|e| error!(enrollment_id = %id, "Failed to cancel enrollment: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Enrollment {id} not found")))?;

        info!(
            enrollment_id = %enrollment.id,
            reason = enrollment.canceled_reason.as_deref().unwrap_or("-"),
            "Enrollment cancelled"
        );
        Ok(enrollment)
    }
}
