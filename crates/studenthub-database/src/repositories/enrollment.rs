//! Enrollment repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_entity::enrollment::{CreateEnrollment, Enrollment};

use super::query;

/// Repository for enrollment operations.
///
/// Cancelling doubles as the soft delete: the row keeps its history and
/// records the reason.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    /// Create a new enrollment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new enrollment.
    pub async fn create(&self, data: &CreateEnrollment) -> AppResult<Enrollment> {
        sqlx::query_as::<_, Enrollment>(
            "INSERT INTO enrollments (student_id, class_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.student_id)
        .bind(data.class_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create enrollment", e))
    }

    /// List active enrollments matching the filter, paginated.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &SearchFilter,
    ) -> AppResult<PageResponse<Enrollment>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM enrollments WHERE deleted_at IS NULL");
        query::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count enrollments", e)
            })?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM enrollments WHERE deleted_at IS NULL");
        query::push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let enrollments = qb
            .build_query_as::<Enrollment>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list enrollments", e)
            })?;

        Ok(PageResponse::new(enrollments, page, total as u64))
    }

    /// List every active enrollment.
    pub async fn list_all(&self) -> AppResult<Vec<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE deleted_at IS NULL ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list all enrollments", e)
        })
    }

    /// Find an active enrollment by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find enrollment by id", e)
        })
    }

    /// Find the active enrollment of a student in a class, if any.
    pub async fn find_by_student_and_class(
        &self,
        student_id: Uuid,
        class_id: Uuid,
    ) -> AppResult<Option<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments \
             WHERE student_id = $1 AND class_id = $2 AND deleted_at IS NULL",
        )
        .bind(student_id)
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find enrollment", e)
        })
    }

    /// Count active enrollments in a class (capacity checks).
    pub async fn count_by_class(&self, class_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM enrollments WHERE class_id = $1 AND deleted_at IS NULL",
        )
        .bind(class_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count enrollments", e)
        })?;
        Ok(count as u64)
    }

    /// Cancel an active enrollment: record the reason and set `deleted_at`.
    ///
    /// Returns `None` when no active enrollment matched the id.
    pub async fn cancel(&self, id: Uuid, reason: Option<&str>) -> AppResult<Option<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "UPDATE enrollments SET canceled_reason = $2, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel enrollment", e))
    }
}
