//! Study program management service.

use std::sync::Arc;

use tracing::{error, info};

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_database::repositories::program::ProgramRepository;
use studenthub_entity::program::{CreateProgram, Program, UpdateProgram};

use crate::ident;

/// Columns the list keyword is matched against.
const KEYWORD_COLUMNS: &[&str] = &["code", "name->>'vi'", "name->>'en'"];

/// Handles program CRUD.
#[derive(Debug, Clone)]
pub struct ProgramService {
    repo: Arc<ProgramRepository>,
}

impl ProgramService {
    /// Creates a new program service.
    pub fn new(repo: Arc<ProgramRepository>) -> Self {
        Self { repo }
    }

    /// Creates a program.
    pub async fn create(&self, data: CreateProgram) -> AppResult<Program> {
        if data.code.trim().is_empty() {
            return Err(AppError::validation("Program code cannot be empty"));
        }
        if self.repo.find_by_code(&data.code).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Program code '{}' already exists",
                data.code
            )));
        }

        let program = self
            .repo
            .create(&data)
            .await
            .inspect_err(|e| error!(code = %data.code, "Failed to create program: {e}"))?;

        info!(program_id = %program.id, code = %program.code, "Program created");
        Ok(program)
    }

    /// Lists programs, optionally filtered by keyword.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<String>,
    ) -> AppResult<PageResponse<Program>> {
        let mut filter = SearchFilter::new();
        if let Some(keyword) = search {
            filter = filter.keyword(keyword, KEYWORD_COLUMNS);
        }
        self.repo.find_all(page, &filter).await
    }

    /// Lists every active program.
    pub async fn list_all(&self) -> AppResult<Vec<Program>> {
        self.repo.list_all().await
    }

    /// Gets a program by id, rejecting malformed ids early.
    pub async fn get(&self, raw_id: &str) -> AppResult<Program> {
        let id = ident::parse_id(raw_id, "program")?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Program {id} not found")))
    }

    /// Applies a partial update. An empty patch returns the stored record
    /// unchanged.
    pub async fn update(&self, raw_id: &str, patch: UpdateProgram) -> AppResult<Program> {
        let id = ident::parse_id(raw_id, "program")?;
        if patch.is_empty() {
            return self.get(raw_id).await;
        }

        let program = self
            .repo
            .update(id, &patch)
            .await
            .inspect_err(|e| error!(program_id = %id, "Failed to update program: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Program {id} not found")))?;

        info!(program_id = %program.id, "Program updated");
        Ok(program)
    }

    /// Soft-deletes a program.
    pub async fn delete(&self, raw_id: &str) -> AppResult<Program> {
        let id = ident::parse_id(raw_id, "program")?;
        let program = self
            .repo
            .soft_delete(id)
            .await
            .inspect_err(|e| error!(program_id = %id, "Failed to delete program: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Program {id} not found")))?;

        info!(program_id = %program.id, "Program deleted");
        Ok(program)
    }
}
