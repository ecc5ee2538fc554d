//! Student repository implementation.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_entity::student::{CreateStudent, Student, UpdateStudent};

use super::query;

/// Repository for student CRUD and query operations.
///
/// All reads and mutations are scoped to active records
/// (`deleted_at IS NULL`).
#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Create a new student repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new student.
    pub async fn create(&self, data: &CreateStudent) -> AppResult<Student> {
        sqlx::query_as::<_, Student>(
            "INSERT INTO students (code, full_name, date_of_birth, gender, faculty_id, \
             program_id, status_id, cohort_year, email, phone, nationality, address, \
             identity_document) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING *",
        )
        .bind(&data.code)
        .bind(&data.full_name)
        .bind(data.date_of_birth)
        .bind(data.gender)
        .bind(data.faculty_id)
        .bind(data.program_id)
        .bind(data.status_id)
        .bind(data.cohort_year)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.nationality)
        .bind(data.address.as_ref().map(Json))
        .bind(data.identity_document.as_ref().map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("students_code_key") =>
            {
                AppError::conflict(format!("Student code '{}' already exists", data.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create student", e),
        })
    }

    /// List active students matching the filter, one bounded page at a time.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &SearchFilter,
    ) -> AppResult<PageResponse<Student>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM students WHERE deleted_at IS NULL");
        query::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count students", e)
            })?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM students WHERE deleted_at IS NULL");
        query::push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let students = qb
            .build_query_as::<Student>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list students", e))?;

        Ok(PageResponse::new(students, page, total as u64))
    }

    /// List every active student, unpaginated (backs `GET /all` and export).
    pub async fn list_all(&self) -> AppResult<Vec<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE deleted_at IS NULL ORDER BY code ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list all students", e))
    }

    /// Find an active student by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find student by id", e))
    }

    /// Find an active student by student code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE code = $1 AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find student by code", e)
        })
    }

    /// Apply a partial update to an active student.
    ///
    /// Only provided fields change; `updated_at` is refreshed. Returns
    /// `None` when no active record matched the id.
    pub async fn update(&self, id: Uuid, patch: &UpdateStudent) -> AppResult<Option<Student>> {
        sqlx::query_as::<_, Student>(
            "UPDATE students SET full_name = COALESCE($2, full_name), \
                                 date_of_birth = COALESCE($3, date_of_birth), \
                                 gender = COALESCE($4, gender), \
                                 faculty_id = COALESCE($5, faculty_id), \
                                 program_id = COALESCE($6, program_id), \
                                 status_id = COALESCE($7, status_id), \
                                 cohort_year = COALESCE($8, cohort_year), \
                                 email = COALESCE($9, email), \
                                 phone = COALESCE($10, phone), \
                                 nationality = COALESCE($11, nationality), \
                                 address = COALESCE($12, address), \
                                 identity_document = COALESCE($13, identity_document), \
                                 updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(&patch.full_name)
        .bind(patch.date_of_birth)
        .bind(patch.gender)
        .bind(patch.faculty_id)
        .bind(patch.program_id)
        .bind(patch.status_id)
        .bind(patch.cohort_year)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(&patch.nationality)
        .bind(patch.address.as_ref().map(Json))
        .bind(patch.identity_document.as_ref().map(Json))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update student", e))
    }

    /// Soft-delete an active student by setting `deleted_at`.
    ///
    /// Returns `None` when no active record matched the id; deleting an
    /// already-deleted student is indistinguishable from deleting a
    /// missing one.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Option<Student>> {
        sqlx::query_as::<_, Student>(
            "UPDATE students SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete student", e))
    }
}
