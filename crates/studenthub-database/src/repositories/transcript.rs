//! Transcript repository implementation.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_entity::transcript::{Transcript, TranscriptRow};

use super::query;

/// Repository for transcript snapshots.
#[derive(Debug, Clone)]
pub struct TranscriptRepository {
    pool: PgPool,
}

impl TranscriptRepository {
    /// Create a new transcript repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace the active transcript snapshot for a student.
    ///
    /// A student has at most one active transcript; recompiling updates
    /// the existing row in place.
    pub async fn upsert_for_student(
        &self,
        student_id: Uuid,
        rows: &[TranscriptRow],
        gpa: f64,
    ) -> AppResult<Transcript> {
        sqlx::query_as::<_, Transcript>(
            "INSERT INTO transcripts (student_id, rows, gpa) VALUES ($1, $2, $3) \
             ON CONFLICT (student_id) WHERE deleted_at IS NULL \
             DO UPDATE SET rows = EXCLUDED.rows, gpa = EXCLUDED.gpa, updated_at = NOW() \
             RETURNING *",
        )
        .bind(student_id)
        .bind(Json(rows))
        .bind(gpa)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store transcript", e))
    }

    /// List active transcripts matching the filter, paginated.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        filter: &SearchFilter,
    ) -> AppResult<PageResponse<Transcript>> {
        let mut count_qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM transcripts WHERE deleted_at IS NULL");
        query::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count transcripts", e)
            })?;

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM transcripts WHERE deleted_at IS NULL");
        query::push_filter(&mut qb, filter);
        qb.push(" ORDER BY updated_at DESC LIMIT ");
        qb.push_bind(page.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset() as i64);

        let transcripts = qb
            .build_query_as::<Transcript>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list transcripts", e)
            })?;

        Ok(PageResponse::new(transcripts, page, total as u64))
    }

    /// List every active transcript.
    pub async fn list_all(&self) -> AppResult<Vec<Transcript>> {
        sqlx::query_as::<_, Transcript>(
            "SELECT * FROM transcripts WHERE deleted_at IS NULL ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list all transcripts", e)
        })
    }

    /// Find an active transcript by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transcript>> {
        sqlx::query_as::<_, Transcript>(
            "SELECT * FROM transcripts WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find transcript by id", e)
        })
    }

    /// Soft-delete an active transcript.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<Option<Transcript>> {
        sqlx::query_as::<_, Transcript>(
            "UPDATE transcripts SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete transcript", e))
    }
}
