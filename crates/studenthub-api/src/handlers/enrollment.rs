//! Enrollment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use studenthub_core::types::pagination::PageResponse;
use studenthub_entity::enrollment::Enrollment;

use crate::dto::request::{CancelEnrollmentRequest, CreateEnrollmentRequest};
use crate::error::{ApiError, validation_error};
use crate::extractors::ListParams;
use crate::state::AppState;

/// Enrollment-specific list filters.
#[derive(Debug, Deserialize)]
pub struct EnrollmentFilterParams {
    /// Restrict to one student.
    pub student_id: Option<Uuid>,
}

/// POST /api/enrollments
pub async fn create_enrollment(
    State(state): State<AppState>,
    Json(req): Json<CreateEnrollmentRequest>,
) -> Result<(StatusCode, Json<Enrollment>), ApiError> {
    req.validate().map_err(validation_error)?;
    let enrollment = state.enrollment_service.create(req.into_create()).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// GET /api/enrollments
pub async fn list_enrollments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<EnrollmentFilterParams>,
) -> Result<Json<PageResponse<Enrollment>>, ApiError> {
    let page = params.page_request();
    let enrollments = state
        .enrollment_service
        .find_all(&page, filters.student_id)
        .await?;
    Ok(Json(enrollments))
}

/// GET /api/enrollments/all
pub async fn list_all_enrollments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Enrollment>>, ApiError> {
    Ok(Json(state.enrollment_service.list_all().await?))
}

/// GET /api/enrollments/{id}
pub async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Enrollment>, ApiError> {
    Ok(Json(state.enrollment_service.get(&id).await?))
}

/// POST /api/enrollments/{id}/cancel
pub async fn cancel_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CancelEnrollmentRequest>,
) -> Result<Json<Enrollment>, ApiError> {
    req.validate().map_err(validation_error)?;
    let enrollment = state.enrollment_service.cancel(&id, req.reason).await?;
    Ok(Json(enrollment))
}

/// DELETE /api/enrollments/{id}
///
/// A delete is a cancellation with no recorded reason.
pub async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Enrollment>, ApiError> {
    Ok(Json(state.enrollment_service.cancel(&id, None).await?))
}
