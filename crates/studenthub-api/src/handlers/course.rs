//! Course handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use studenthub_core::types::pagination::PageResponse;
use studenthub_entity::course::Course;

use crate::dto::request::{CreateCourseRequest, UpdateCourseRequest};
use crate::error::{ApiError, validation_error};
use crate::extractors::ListParams;
use crate::state::AppState;

/// POST /api/courses
pub async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), ApiError> {
    req.validate().map_err(validation_error)?;
    let course = state.course_service.create(req.into_create()).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/courses
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse<Course>>, ApiError> {
    let page = params.page_request();
    let courses = state
        .course_service
        .find_all(&page, params.search_string)
        .await?;
    Ok(Json(courses))
}

/// GET /api/courses/all
pub async fn list_all_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.course_service.list_all().await?))
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, ApiError> {
    Ok(Json(state.course_service.get(&id).await?))
}

/// PATCH /api/courses/{id}
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, ApiError> {
    req.validate().map_err(validation_error)?;
    let course = state.course_service.update(&id, req.into_update()).await?;
    Ok(Json(course))
}

/// DELETE /api/courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, ApiError> {
    Ok(Json(state.course_service.delete(&id).await?))
}
