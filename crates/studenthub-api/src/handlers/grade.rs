//! Grade handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use studenthub_core::types::pagination::PageResponse;
use studenthub_entity::grade::Grade;

use crate::dto::request::{CreateGradeRequest, UpdateGradeRequest};
use crate::error::{ApiError, validation_error};
use crate::extractors::ListParams;
use crate::state::AppState;

/// Grade-specific list filters.
#[derive(Debug, Deserialize)]
pub struct GradeFilterParams {
    /// Restrict to one student.
    pub student_id: Option<Uuid>,
}

/// POST /api/grades
pub async fn create_grade(
    State(state): State<AppState>,
    Json(req): Json<CreateGradeRequest>,
) -> Result<(StatusCode, Json<Grade>), ApiError> {
    req.validate().map_err(validation_error)?;
    let grade = state.grade_service.create(req.into_create()).await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

/// GET /api/grades
pub async fn list_grades(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<GradeFilterParams>,
) -> Result<Json<PageResponse<Grade>>, ApiError> {
    let page = params.page_request();
    let grades = state.grade_service.find_all(&page, filters.student_id).await?;
    Ok(Json(grades))
}

/// GET /api/grades/all
pub async fn list_all_grades(State(state): State<AppState>) -> Result<Json<Vec<Grade>>, ApiError> {
    Ok(Json(state.grade_service.list_all().await?))
}

/// GET /api/grades/{id}
pub async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Grade>, ApiError> {
    Ok(Json(state.grade_service.get(&id).await?))
}

/// PATCH /api/grades/{id}
pub async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateGradeRequest>,
) -> Result<Json<Grade>, ApiError> {
    req.validate().map_err(validation_error)?;
    let grade = state.grade_service.update(&id, req.into_update()).await?;
    Ok(Json(grade))
}

/// DELETE /api/grades/{id}
pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Grade>, ApiError> {
    Ok(Json(state.grade_service.delete(&id).await?))
}
