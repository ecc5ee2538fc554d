//! Transcript handlers.
//!
//! Transcripts are compiled, not posted: creation happens through
//! `GET /api/students/{id}/transcript`, which recompiles from grades.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use studenthub_core::types::pagination::PageResponse;
use studenthub_entity::transcript::Transcript;

use crate::error::ApiError;
use crate::extractors::ListParams;
use crate::state::AppState;

/// Transcript-specific list filters.
#[derive(Debug, Deserialize)]
pub struct TranscriptFilterParams {
    /// Restrict to one student.
    pub student_id: Option<Uuid>,
}

/// GET /api/transcripts
pub async fn list_transcripts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<TranscriptFilterParams>,
) -> Result<Json<PageResponse<Transcript>>, ApiError> {
    let page = params.page_request();
    let transcripts = state
        .transcript_service
        .find_all(&page, filters.student_id)
        .await?;
    Ok(Json(transcripts))
}

/// GET /api/transcripts/all
pub async fn list_all_transcripts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transcript>>, ApiError> {
    Ok(Json(state.transcript_service.list_all().await?))
}

/// GET /api/transcripts/{id}
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transcript>, ApiError> {
    Ok(Json(state.transcript_service.get(&id).await?))
}

/// DELETE /api/transcripts/{id}
pub async fn delete_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transcript>, ApiError> {
    Ok(Json(state.transcript_service.delete(&id).await?))
}
