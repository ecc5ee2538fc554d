//! Study program repository implementation.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_entity::program::{CreateProgram, Program, UpdateProgram};

use super::query;

/// Repository for program CRUD and query operations.
#[derive(Debug, Clone)]
pub struct ProgramRepository {
    pool: PgPool,
}

impl ProgramRepository {
    /// Create a new program repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new program.
    pub async fn create(&self, data: &CreateProgram) -> AppResult<Program> {
        sqlx::query_as::<_, Program>(
            "INSERT INTO programs (code, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.code)
        .bind(Json(&data.name))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("programs_code_key") =>
            {
                AppError::conflict(format!("Program code '{}' already exists", data.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create program", e),
        })
    }

    /// List active programs matching the filter, paginated.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &SearchFilter,
    ) -> AppResult<PageResponse<Program>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM programs WHERE deleted_at IS NULL");
        query::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count programs", e)
            })?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM programs WHERE deleted_at IS NULL");
        query::push_filter(&mut qb, filter);
        qb.push(" ORDER BY code ASC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let programs = qb
            .build_query_as::<Program>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list programs", e)
            })?;

        Ok(PageResponse::new(programs, page, total as u64))
    }

    /// List every active program.
    pub async fn list_all(&self) -> AppResult<Vec<Program>> {
        sqlx::query_as::<_, Program>(
            "SELECT * FROM programs WHERE deleted_at IS NULL ORDER BY code ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list all programs", e))
    }

    /// Find an active program by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Program>> {
        sqlx::query_as::<_, Program>(
            "SELECT * FROM programs WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find program by id", e))
    }

    /// Find an active program by code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Program>> {
        sqlx::query_as::<_, Program>(
            "SELECT * FROM programs WHERE code = $1 AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find program by code", e)
        })
    }

    /// Apply a partial update to an active program.
    pub async fn update(&self, id: Uuid, patch: &UpdateProgram) -> AppResult<Option<Program>> {
        sqlx::query_as::<_, Program>(
            "UPDATE programs SET code = COALESCE($2, code), \
                                  name = COALESCE($3, name), \
                                  updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(&patch.code)
        .bind(patch.name.as_ref().map(Json))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update program", e))
    }

    /// Soft-delete an active program.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Option<Program>> {
        sqlx::query_as::<_, Program>(
            "UPDATE programs SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete program", e))
    }
}
