//! Faculty repository implementation.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_entity::faculty::{CreateFaculty, Faculty, UpdateFaculty};

use super::query;

/// Repository for faculty CRUD and query operations.
#[derive(Debug, Clone)]
pub struct FacultyRepository {
    pool: PgPool,
}

impl FacultyRepository {
    /// Create a new faculty repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new faculty.
    pub async fn create(&self, data: &CreateFaculty) -> AppResult<Faculty> {
        sqlx::query_as::<_, Faculty>(
            "INSERT INTO faculties (code, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.code)
        .bind(Json(&data.name))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("faculties_code_key") =>
            {
                AppError::conflict(format!("Faculty code '{}' already exists", data.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create faculty", e),
        })
    }

    /// List active faculties matching the filter, paginated.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &SearchFilter,
    ) -> AppResult<PageResponse<Faculty>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM faculties WHERE deleted_at IS NULL");
        query::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count faculties", e)
            })?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM faculties WHERE deleted_at IS NULL");
        query::push_filter(&mut qb, filter);
        qb.push(" ORDER BY code ASC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let faculties = qb
            .build_query_as::<Faculty>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list faculties", e)
            })?;

        Ok(PageResponse::new(faculties, page, total as u64))
    }

    /// List every active faculty.
    pub async fn list_all(&self) -> AppResult<Vec<Faculty>> {
        sqlx::query_as::<_, Faculty>(
            "SELECT * FROM faculties WHERE deleted_at IS NULL ORDER BY code ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list all faculties", e))
    }

    /// Find an active faculty by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Faculty>> {
        sqlx::query_as::<_, Faculty>(
            "SELECT * FROM faculties WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find faculty by id", e))
    }

    /// Find an active faculty by code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Faculty>> {
        sqlx::query_as::<_, Faculty>(
            "SELECT * FROM faculties WHERE code = $1 AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find faculty by code", e)
        })
    }

    /// Apply a partial update to an active faculty.
    pub async fn update(&self, id: Uuid, patch: &UpdateFaculty) -> AppResult<Option<Faculty>> {
        sqlx::query_as::<_, Faculty>(
            "UPDATE faculties SET code = COALESCE($2, code), \
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
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update faculty", e))
    }

    /// Soft-delete an active faculty.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Option<Faculty>> {
        sqlx::query_as::<_, Faculty>(
            "UPDATE faculties SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete faculty", e))
    }
}
