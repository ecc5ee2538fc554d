//! Student status management service.

use std::sync::Arc;

use tracing::{error, info};

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_database::repositories::status::StudentStatusRepository;
use studenthub_entity::status::{CreateStudentStatus, StudentStatus, UpdateStudentStatus};

use crate::ident;

/// Columns the list keyword is matched against.
const KEYWORD_COLUMNS: &[&str] = &["code", "name->>'vi'", "name->>'en'"];

/// Handles student status CRUD.
#[derive(Debug, Clone)]
pub struct StudentStatusService {
    repo: Arc<StudentStatusRepository>,
}

impl StudentStatusService {
    /// Creates a new status service.
    pub fn new(repo: Arc<StudentStatusRepository>) -> Self {
        Self { repo }
    }

    /// Creates a status.
    pub async fn create(&self, data: CreateStudentStatus) -> AppResult<StudentStatus> {
        if data.code.trim().is_empty() {
            return Err(AppError::validation("Status code cannot be empty"));
        }
        if self.repo.find_by_code(&data.code).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Status code '{}' already exists",
                data.code
            )));
        }

        let status = self
            .repo
            .create(&data)
            .await
            .inspect_err(|e| error!(code = %data.code, "Failed to create status: {e}"))?;

        info!(status_id = %status.id, code = %status.code, "Status created");
        Ok(status)
    }

    /// Lists statuses, optionally filtered by keyword.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<String>,
    ) -> AppResult<PageResponse<StudentStatus>> {
        let mut filter = SearchFilter::new();
        if let Some(keyword) = search {
            filter = filter.keyword(keyword, KEYWORD_COLUMNS);
        }
        self.repo.find_all(page, &filter).await
    }

    /// Lists every active status.
    pub async fn list_all(&self) -> AppResult<Vec<StudentStatus>> {
        self.repo.list_all().await
    }

    /// Gets a status by id, rejecting malformed ids early.
    pub async fn get(&self, raw_id: &str) -> AppResult<StudentStatus> {
        let id = ident::parse_id(raw_id, "status")?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Status {id} not found")))
    }

    /// Applies a partial update. An empty patch returns the stored record
    /// unchanged.
    pub async fn update(&self, raw_id: &str, patch: UpdateStudentStatus) -> AppResult<StudentStatus> {
        let id = ident::parse_id(raw_id, "status")?;
        if patch.is_empty() {
            return self.get(raw_id).await;
        }

        let status = self
            .repo
            .update(id, &patch)
            .await
            .inspect_err(|e| error!(status_id = %id, "Failed to update status: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Status {id} not found")))?;

        info!(status_id = %status.id, "Status updated");
        Ok(status)
    }

    /// Soft-deletes a status.
    pub async fn delete(&self, raw_id: &str) -> AppResult<StudentStatus> {
        let id = ident::parse_id(raw_id, "status")?;
        let status = self
            .repo
            .soft_delete(id)
            .await
            .inspect_err(|e| error!(status_id = %id, "Failed to delete status: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Status {id} not found")))?;

        info!(status_id = %status.id, "Status deleted");
        Ok(status)
    }
}
