//! Course catalog service.

use std::sync::Arc;

use tracing::{error, info};

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_database::repositories::course::CourseRepository;
use studenthub_database::repositories::faculty::FacultyRepository;
use studenthub_entity::course::{Course, CreateCourse, MIN_CREDITS, UpdateCourse};

use crate::ident;

const KEYWORD_COLUMNS: &[&str] = &["code", "name->>'vi'", "name->>'en'"];

/// Handles course CRUD and catalog rules.
#[derive(Debug, Clone)]
pub struct CourseService {
    repo: Arc<CourseRepository>,
    faculties: Arc<FacultyRepository>,
}

impl CourseService {
    /// Creates a new course service.
    pub fn new(repo: Arc<CourseRepository>, faculties: Arc<FacultyRepository>) -> Self {
        Self { repo, faculties }
    }

    /// Creates a course.
    ///
    /// A course must carry at least [`MIN_CREDITS`] credits, reference an
    /// active faculty, and any prerequisite must be an active course.
    pub async fn create(&self, data: CreateCourse) -> AppResult<Course> {
        if data.code.trim().is_empty() {
            return Err(AppError::validation("Course code cannot be empty"));
        }
        if data.credits < MIN_CREDITS {
            return Err(AppError::validation(format!(
                "Course must carry at least {MIN_CREDITS} credits, got {}",
                data.credits
            )));
        }

        if self.repo.find_by_code(&data.code).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Course code '{}' already exists",
                data.code
            )));
        }

        if self.faculties.find_by_id(data.faculty_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Unknown faculty {}",
                data.faculty_id
            )));
        }
        if let Some(prereq_id) = data.prerequisite_course_id {
            if self.repo.find_by_id(prereq_id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "Unknown prerequisite course {prereq_id}"
                )));
            }
        }

        let course = self
            .repo
            .create(&data)
            .await
            .inspect_err(|e| error!(code = %data.code, "Failed to create course: {e}"))?;

        info!(course_id = %course.id, code = %course.code, "Course created");
        Ok(course)
    }

    /// Lists courses, optionally filtered by keyword.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<String>,
    ) -> AppResult<PageResponse<Course>> {
        let mut filter = SearchFilter::new();
        if let Some(keyword) = search {
            filter = filter.keyword(keyword, KEYWORD_COLUMNS);
        }
        self.repo.find_all(page, &filter).await
    }

    /// Lists every active course.
    pub async fn list_all(&self) -> AppResult<Vec<Course>> {
        self.repo.list_all().await
    }

    /// Gets a course by id, rejecting malformed ids early.
    pub async fn get(&self, raw_id: &str) -> AppResult<Course> {
        let id = ident::parse_id(raw_id, "course")?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {id} not found")))
    }

    /// Applies a partial update. An empty patch returns the stored record
    /// unchanged.
    pub async fn update(&self, raw_id: &str, patch: UpdateCourse) -> AppResult<Course> {
        let id = ident::parse_id(raw_id, "course")?;
        if patch.is_empty() {
            return self.get(raw_id).await;
        }

        if let Some(credits) = patch.credits {
            if credits < MIN_CREDITS {
                return Err(AppError::validation(format!(
                    "Course must carry at least {MIN_CREDITS} credits, got {credits}"
                )));
            }
        }
        if let Some(faculty_id) = patch.faculty_id {
            if self.faculties.find_by_id(faculty_id).await?.is_none() {
                return Err(AppError::validation(format!("Unknown faculty {faculty_id}")));
            }
        }

        let course = self
            .repo
            .update(id, &patch)
            .await
            .inspect_err(|e| error!(course_id = %id, "Failed to update course: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Course {id} not found")))?;

        info!(course_id = %course.id, "Course updated");
        Ok(course)
    }

    /// Soft-deletes a course.
    pub async fn delete(&self, raw_id: &str) -> AppResult<Course> {
        let id = ident::parse_id(raw_id, "course")?;
        let course = self
            .repo
            .soft_delete(id)
            .await
            .inspect_err(|e| error!(course_id = %id, "Failed to delete course: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Course {id} not found")))?;

        info!(course_id = %course.id, "Course deleted");
        Ok(course)
    }
}
