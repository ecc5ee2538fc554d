//! Open class repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_entity::open_class::{CreateOpenClass, OpenClass, UpdateOpenClass};

use super::query;

/// Repository for open class CRUD and query operations.
#[derive(Debug, Clone)]
pub struct OpenClassRepository {
    pool: PgPool,
}

impl OpenClassRepository {
    /// Create a new open class repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a newly opened class.
    pub async fn create(&self, data: &CreateOpenClass) -> AppResult<OpenClass> {
        sqlx::query_as::<_, OpenClass>(
            "INSERT INTO open_classes (code, course_id, academic_year, semester, lecturer, \
             max_capacity, schedule, room) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&data.code)
        .bind(data.course_id)
        .bind(&data.academic_year)
        .bind(data.semester)
        .bind(&data.lecturer)
        .bind(data.max_capacity)
        .bind(&data.schedule)
        .bind(&data.room)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("open_classes_code_key") =>
            {
                AppError::conflict(format!("Class code '{}' already exists", data.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create class", e),
        })
    }

    /// List active classes matching the filter, paginated.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &SearchFilter,
    ) -> AppResult<PageResponse<OpenClass>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM open_classes WHERE deleted_at IS NULL");
        query::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count classes", e))?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM open_classes WHERE deleted_at IS NULL");
        query::push_filter(&mut qb, filter);
        qb.push(" ORDER BY code ASC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let classes = qb
            .build_query_as::<OpenClass>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list classes", e))?;

        Ok(PageResponse::new(classes, page, total as u64))
    }

    /// List every active class.
    pub async fn list_all(&self) -> AppResult<Vec<OpenClass>> {
        sqlx::query_as::<_, OpenClass>(
            "SELECT * FROM open_classes WHERE deleted_at IS NULL ORDER BY code ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list all classes", e))
    }

    /// Find an active class by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<OpenClass>> {
        sqlx::query_as::<_, OpenClass>(
            "SELECT * FROM open_classes WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find class by id", e))
    }

    /// Find an active class by code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<OpenClass>> {
        sqlx::query_as::<_, OpenClass>(
            "SELECT * FROM open_classes WHERE code = $1 AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find class by code", e))
    }

    /// Apply a partial update to an active class.
    pub async fn update(&self, id: Uuid, patch: &UpdateOpenClass) -> AppResult<Option<OpenClass>> {
        sqlx::query_as::<_, OpenClass>(
            "UPDATE open_classes SET lecturer = COALESCE($2, lecturer), \
                                     max_capacity = COALESCE($3, max_capacity), \
                                     schedule = COALESCE($4, schedule), \
                                     room = COALESCE($5, room), \
                                     updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(&patch.lecturer)
        .bind(patch.max_capacity)
        .bind(&patch.schedule)
        .bind(&patch.room)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update class", e))
    }

    /// Soft-delete an active class.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Option<OpenClass>> {
        sqlx::query_as::<_, OpenClass>(
            "UPDATE open_classes SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete class", e))
    }
}
