//! Grade repository implementation.

use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_entity::grade::{CreateGrade, Grade, UpdateGrade};
use studenthub_entity::localized::LocalizedName;

use super::query;

/// A student's score joined with the course it was earned for.
///
/// Backs transcript compilation; not an entity of its own.
#[derive(Debug, Clone, FromRow)]
pub struct StudentGradeRow {
    /// Course code.
    pub course_code: String,
    /// Course display name.
    pub course_name: Json<LocalizedName>,
    /// Credits the course carries.
    pub credits: i16,
    /// Score on the 10-point scale.
    pub score: f64,
}

/// Repository for grade CRUD and transcript source queries.
#[derive(Debug, Clone)]
pub struct GradeRepository {
    pool: PgPool,
}

impl GradeRepository {
    /// Create a new grade repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new grade.
    pub async fn create(&self, data: &CreateGrade) -> AppResult<Grade> {
        sqlx::query_as::<_, Grade>(
            "INSERT INTO grades (student_id, class_id, score) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.student_id)
        .bind(data.class_id)
        .bind(data.score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create grade", e))
    }

    /// List active grades matching the filter, paginated.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &SearchFilter,
    ) -> AppResult<PageResponse<Grade>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM grades WHERE deleted_at IS NULL");
        query::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count grades", e))?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM grades WHERE deleted_at IS NULL");
        query::push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let grades = qb
            .build_query_as::<Grade>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list grades", e))?;

        Ok(PageResponse::new(grades, page, total as u64))
    }

    /// List every active grade.
    pub async fn list_all(&self) -> AppResult<Vec<Grade>> {
        sqlx::query_as::<_, Grade>(
            "SELECT * FROM grades WHERE deleted_at IS NULL ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list all grades", e))
    }

    /// Find an active grade by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Grade>> {
        sqlx::query_as::<_, Grade>("SELECT * FROM grades WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find grade by id", e)
            })
    }

    /// Find the active grade of a student in a class, if any.
    pub async fn find_by_student_and_class(
        &self,
        student_id: Uuid,
        class_id: Uuid,
    ) -> AppResult<Option<Grade>> {
        sqlx::query_as::<_, Grade>(
            "SELECT * FROM grades WHERE student_id = $1 AND class_id = $2 AND deleted_at IS NULL",
        )
        .bind(student_id)
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find grade", e))
    }

    /// Apply a partial update to an active grade.
    pub async fn update(&self, id: Uuid, patch: &UpdateGrade) -> AppResult<Option<Grade>> {
        sqlx::query_as::<_, Grade>(
            "UPDATE grades SET score = COALESCE($2, score), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(patch.score)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update grade", e))
    }

    /// Soft-delete an active grade.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Option<Grade>> {
        sqlx::query_as::<_, Grade>(
            "UPDATE grades SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete grade", e))
    }

    /// Load a student's active grades joined with course code, name and
    /// credits, in course-code order. Source rows for transcript
    /// compilation.
    pub async fn transcript_rows(&self, student_id: Uuid) -> AppResult<Vec<StudentGradeRow>> {
        sqlx::query_as::<_, StudentGradeRow>(
            "SELECT c.code AS course_code, c.name AS course_name, c.credits, g.score \
             FROM grades g \
             JOIN open_classes oc ON oc.id = g.class_id \
             JOIN courses c ON c.id = oc.course_id \
             WHERE g.student_id = $1 \
               AND g.deleted_at IS NULL \
               AND oc.deleted_at IS NULL \
               AND c.deleted_at IS NULL \
             ORDER BY c.code ASC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load transcript rows", e)
        })
    }
}
