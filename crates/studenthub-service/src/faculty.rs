//! Faculty management service.

use std::sync::Arc;

use tracing::{error, info};

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_database::repositories::faculty::FacultyRepository;
use studenthub_entity::faculty::{CreateFaculty, Faculty, UpdateFaculty};

use crate::ident;

/// Columns the list keyword is matched against.
const KEYWORD_COLUMNS: &[&str] = &["code", "name->>'vi'", "name->>'en'"];

/// Handles faculty CRUD.
#[derive(Debug, Clone)]
pub struct FacultyService {
    repo: Arc<FacultyRepository>,
}

impl FacultyService {
    /// Creates a new faculty service.
    pub fn new(repo: Arc<FacultyRepository>) -> Self {
        Self { repo }
    }

    /// Creates a faculty.
    pub async fn create(&self, data: CreateFaculty) -> AppResult<Faculty> {
        if data.code.trim().is_empty() {
            return Err(AppError::validation("Faculty code cannot be empty"));
        }
        if self.repo.find_by_code(&data.code).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Faculty code '{}' already exists",
                data.code
            )));
        }

        let faculty = self
            .repo
            .create(&data)
            .await
            .inspect_err(|e| error!(code = %data.code, "Failed to create faculty: {e}"))?;

        info!(faculty_id = %faculty.id, code = %faculty.code, "Faculty created");
        Ok(faculty)
    }

    /// Lists faculties, optionally filtered by keyword.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<String>,
    ) -> AppResult<PageResponse<Faculty>> {
        let mut filter = SearchFilter::new();
        if let Some(keyword) = search {
            filter = filter.keyword(keyword, KEYWORD_COLUMNS);
        }
        self.repo.find_all(page, &filter).await
    }

    /// Lists every active faculty.
    pub async fn list_all(&self) -> AppResult<Vec<Faculty>> {
        self.repo.list_all().await
    }

    /// Gets a faculty by id, rejecting malformed ids early.
    pub async fn get(&self, raw_id: &str) -> AppResult<Faculty> {
        let id = ident::parse_id(raw_id, "faculty")?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Faculty {id} not found")))
    }

    /// Applies a partial update. An empty patch returns the stored record
    /// unchanged.
    pub async fn update(&self, raw_id: &str, patch: UpdateFaculty) -> AppResult<Faculty> {
        let id = ident::parse_id(raw_id, "faculty")?;
        if patch.is_empty() {
            return self.get(raw_id).await;
        }

        let faculty = self
            .repo
            .update(id, &patch)
            .await
            .inspect_err(|e| error!(faculty_id = %id, "Failed to update faculty: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Faculty {id} not found")))?;

        info!(faculty_id = %faculty.id, "Faculty updated");
        Ok(faculty)
    }

    /// Soft-deletes a faculty.
    pub async fn delete(&self, raw_id: &str) -> AppResult<Faculty> {
        let id = ident::parse_id(raw_id, "faculty")?;
        let faculty = self
            .repo
            .soft_delete(id)
            .await
            .inspect_err(|e| error!(faculty_id = %id, "Failed to delete faculty: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Faculty {id} not found")))?;

        info!(faculty_id = %faculty.id, "Faculty deleted");
        Ok(faculty)
    }
}
