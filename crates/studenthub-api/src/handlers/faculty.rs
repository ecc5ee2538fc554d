//! Faculty handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use studenthub_core::types::pagination::PageResponse;
use studenthub_entity::faculty::Faculty;

use crate::dto::request::{CreateFacultyRequest, UpdateFacultyRequest};
use crate::error::{ApiError, validation_error};
use crate::extractors::ListParams;
use crate::state::AppState;

/// POST /api/faculties
pub async fn create_faculty(
    State(state): State<AppState>,
    Json(req): Json<CreateFacultyRequest>,
) -> Result<(StatusCode, Json<Faculty>), ApiError> {
    req.validate().map_err(validation_error)?;
    let faculty = state.faculty_service.create(req.into_create()).await?;
    Ok((StatusCode::CREATED, Json(faculty)))
}

/// GET /api/faculties
pub async fn list_faculties(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse<Faculty>>, ApiError> {
    let page = params.page_request();
    let faculties = state
        .faculty_service
        .find_all(&page, params.search_string)
        .await?;
    Ok(Json(faculties))
}

/// GET /api/faculties/all
pub async fn list_all_faculties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Faculty>>, ApiError> {
    Ok(Json(state.faculty_service.list_all().await?))
}

/// GET /api/faculties/{id}
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Faculty>, ApiError> {
    Ok(Json(state.faculty_service.get(&id).await?))
}

/// PATCH /api/faculties/{id}
pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateFacultyRequest>,
) -> Result<Json<Faculty>, ApiError> {
    req.validate().map_err(validation_error)?;
    let faculty = state.faculty_service.update(&id, req.into_update()).await?;
    Ok(Json(faculty))
}

/// DELETE /api/faculties/{id}
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Faculty>, ApiError> {
    Ok(Json(state.faculty_service.delete(&id).await?))
}
