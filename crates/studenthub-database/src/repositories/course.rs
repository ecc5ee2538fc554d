//! Course repository implementation.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_entity::course::{Course, CreateCourse, UpdateCourse};

use super::query;

/// Repository for course CRUD and query operations.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    /// Create a new course repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new course.
    pub async fn create(&self, data: &CreateCourse) -> AppResult<Course> {
        sqlx::query_as::<_, Course>(
            "INSERT INTO courses (code, name, credits, faculty_id, description, \
             prerequisite_course_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.code)
        .bind(Json(&data.name))
        .bind(data.credits)
        .bind(data.faculty_id)
        .bind(&data.description)
        .bind(data.prerequisite_course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("courses_code_key") => {
                AppError::conflict(format!("Course code '{}' already exists", data.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create course", e),
        })
    }

    /// List active courses matching the filter, paginated.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &SearchFilter,
    ) -> AppResult<PageResponse<Course>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM courses WHERE deleted_at IS NULL");
        query::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count courses", e))?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM courses WHERE deleted_at IS NULL");
        query::push_filter(&mut qb, filter);
        qb.push(" ORDER BY code ASC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let courses = qb
            .build_query_as::<Course>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list courses", e))?;

        Ok(PageResponse::new(courses, page, total as u64))
    }

    /// List every active course.
    pub async fn list_all(&self) -> AppResult<Vec<Course>> {
        sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE deleted_at IS NULL ORDER BY code ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list all courses", e))
    }

    /// Find an active course by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find course by id", e)
            })
    }

    /// Find an active course by code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE code = $1 AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find course by code", e)
        })
    }

    /// Apply a partial update to an active course.
    pub async fn update(&self, id: Uuid, patch: &UpdateCourse) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>(
            "UPDATE courses SET name = COALESCE($2, name), \
                                credits = COALESCE($3, credits), \
                                faculty_id = COALESCE($4, faculty_id), \
                                description = COALESCE($5, description), \
                                updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(patch.name.as_ref().map(Json))
        .bind(patch.credits)
        .bind(patch.faculty_id)
        .bind(&patch.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update course", e))
    }

    /// Soft-delete an active course.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>(
            "UPDATE courses SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete course", e))
    }
}
