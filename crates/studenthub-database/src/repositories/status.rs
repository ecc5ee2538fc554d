//! Student status repository implementation.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_entity::status::{CreateStudentStatus, StudentStatus, UpdateStudentStatus};

use super::query;

/// Repository for student status CRUD and query operations.
#[derive(Debug, Clone)]
pub struct StudentStatusRepository {
    pool: PgPool,
}

impl StudentStatusRepository {
    /// Create a new status repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new status.
    pub async fn create(&self, data: &CreateStudentStatus) -> AppResult<StudentStatus> {
        sqlx::query_as::<_, StudentStatus>(
            "INSERT INTO student_statuses (code, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.code)
        .bind(Json(&data.name))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("student_statuses_code_key") =>
            {
                AppError::conflict(format!("Status code '{}' already exists", data.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create status", e),
        })
    }

    /// List active statuses matching the filter, paginated.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &SearchFilter,
    ) -> AppResult<PageResponse<StudentStatus>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM student_statuses WHERE deleted_at IS NULL");
        query::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count statuses", e)
            })?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM student_statuses WHERE deleted_at IS NULL");
        query::push_filter(&mut qb, filter);
        qb.push(" ORDER BY code ASC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let student_statuses = qb
            .build_query_as::<StudentStatus>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list statuses", e)
            })?;

        Ok(PageResponse::new(student_statuses, page, total as u64))
    }

    /// List every active status.
    pub async fn list_all(&self) -> AppResult<Vec<StudentStatus>> {
        sqlx::query_as::<_, StudentStatus>(
            "SELECT * FROM student_statuses WHERE deleted_at IS NULL ORDER BY code ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list all statuses", e))
    }

    /// Find an active status by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StudentStatus>> {
        sqlx::query_as::<_, StudentStatus>(
            "SELECT * FROM student_statuses WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find status by id", e))
    }

    /// Find an active status by code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<StudentStatus>> {
        sqlx::query_as::<_, StudentStatus>(
            "SELECT * FROM student_statuses WHERE code = $1 AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find status by code", e)
        })
    }

    /// Apply a partial update to an active status.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &UpdateStudentStatus,
    ) -> AppResult<Option<StudentStatus>> {
        sqlx::query_as::<_, StudentStatus>(
            "UPDATE student_statuses SET code = COALESCE($2, code), \
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
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))
    }

    /// Soft-delete an active status.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Option<StudentStatus>> {
        sqlx::query_as::<_, StudentStatus>(
            "UPDATE student_statuses SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete status", e))
    }
}
