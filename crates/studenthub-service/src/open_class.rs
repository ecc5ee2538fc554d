//! Open class management service.

use std::sync::Arc;

use tracing::{error, info};

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_database::repositories::course::CourseRepository;
use studenthub_database::repositories::open_class::OpenClassRepository;
use studenthub_entity::open_class::{CreateOpenClass, OpenClass, UpdateOpenClass};

use crate::ident;

const KEYWORD_COLUMNS: &[&str] = &["code", "lecturer", "academic_year"];

/// Handles open class CRUD.
#[derive(Debug, Clone)]
pub struct OpenClassService {
    repo: Arc<OpenClassRepository>,
    courses: Arc<CourseRepository>,
}

impl OpenClassService {
    /// Creates a new open class service.
    pub fn new(repo: Arc<OpenClassRepository>, courses: Arc<CourseRepository>) -> Self {
        Self { repo, courses }
    }

    /// Opens a class for an active course.
    pub async fn create(&self, data: CreateOpenClass) -> AppResult<OpenClass> {
        if data.code.trim().is_empty() {
            return Err(AppError::validation("Class code cannot be empty"));
        }
        if data.max_capacity <= 0 {
            return Err(AppError::validation(format!(
                "Class capacity must be positive, got {}",
                data.max_capacity
            )));
        }
        if !(1..=3).contains(&data.semester) {
            return Err(AppError::validation(format!(
                "Semester must be 1, 2 or 3, got {}",
                data.semester
            )));
        }

        if self.repo.find_by_code(&data.code).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Class code '{}' already exists",
                data.code
            )));
        }

        if self.courses.find_by_id(data.course_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Unknown course {}",
                data.course_id
            )));
        }

        let class = self
            .repo
            .create(&data)
            .await
            .inspect_err(|e| error!(code = %data.code, "Failed to create class: {e}"))?;

        info!(class_id = %class.id, code = %class.code, "Class opened");
        Ok(class)
    }

    /// Lists classes, optionally filtered by keyword.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<String>,
    ) -> AppResult<PageResponse<OpenClass>> {
        let mut filter = SearchFilter::new();
        if let Some(keyword) = search {
            filter = filter.keyword(keyword, KEYWORD_COLUMNS);
        }
        self.repo.find_all(page, &filter).await
    }

    /// Lists every active class.
    pub async fn list_all(&self) -> AppResult<Vec<OpenClass>> {
        self.repo.list_all().await
    }

    /// Gets a class by id, rejecting malformed ids early.
    pub async fn get(&self, raw_id: &str) -> AppResult<OpenClass> {
        let id = ident::parse_id(raw_id, "class")?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Class {id} not found")))
    }

    /// Applies a partial update. An empty patch returns the stored record
    /// unchanged.
    pub async fn update(&self, raw_id: &str, patch: UpdateOpenClass) -> AppResult<OpenClass> {
        let id = ident::parse_id(raw_id, "class")?;
        if patch.is_empty() {
            return self.get(raw_id).await;
        }

        if let Some(capacity) = patch.max_capacity {
            if capacity <= 0 {
                return Err(AppError::validation(format!(
                    "Class capacity must be positive, got {capacity}"
                )));
            }
        }

        let class = self
            .repo
            .update(id, &patch)
            .await
            .inspect_err(|e| error!(class_id = %id, "Failed to update class: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Class {id} not found")))?;

        info!(class_id = %class.id, "Class updated");
        Ok(class)
    }

    /// Soft-deletes a class.
    pub async fn delete(&self, raw_id: &str) -> AppResult<OpenClass> {
        let id = ident::parse_id(raw_id, "class")?;
        let class = self
            .repo
            .soft_delete(id)
            .await
            .inspect_err(|e| error!(class_id = %id, "Failed to delete class: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Class {id} not found")))?;

        info!(class_id = %class.id, "Class deleted");
        Ok(class)
    }
}
