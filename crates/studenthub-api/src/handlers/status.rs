//! Student status handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use studenthub_core::types::pagination::PageResponse;
use studenthub_entity::status::StudentStatus;

use crate::dto::request::{CreateStudentStatusRequest, UpdateStudentStatusRequest};
use crate::error::{ApiError, validation_error};
use crate::extractors::ListParams;
use crate::state::AppState;

/// POST /api/student-statuses
pub async fn create_status(
    State(state): State<AppState>,
    Json(req): Json<CreateStudentStatusRequest>,
) -> Result<(StatusCode, Json<StudentStatus>), ApiError> {
    req.validate().map_err(validation_error)?;
    let status = state.status_service.create(req.into_create()).await?;
    Ok((StatusCode::CREATED, Json(status)))
}

/// GET /api/student-statuses
pub async fn list_statuses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse<StudentStatus>>, ApiError> {
    let page = params.page_request();
    let statuses = state
        .status_service
        .find_all(&page, params.search_string)
        .await?;
    Ok(Json(statuses))
}

/// GET /api/student-statuses/all
pub async fn list_all_statuses(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentStatus>>, ApiError> {
    Ok(Json(state.status_service.list_all().await?))
}

/// GET /api/student-statuses/{id}
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentStatus>, ApiError> {
    Ok(Json(state.status_service.get(&id).await?))
}

/// PATCH /api/student-statuses/{id}
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStudentStatusRequest>,
) -> Result<Json<StudentStatus>, ApiError> {
    req.validate().map_err(validation_error)?;
    let status = state.status_service.update(&id, req.into_update()).await?;
    Ok(Json(status))
}

/// DELETE /api/student-statuses/{id}
pub async fn delete_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentStatus>, ApiError> {
    Ok(Json(state.status_service.delete(&id).await?))
}
