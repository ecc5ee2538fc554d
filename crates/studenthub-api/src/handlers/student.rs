//! Student handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use studenthub_core::types::pagination::PageResponse;
use studenthub_entity::student::Student;
use studenthub_entity::transcript::Transcript;
use studenthub_service::student::StudentListQuery;

use crate::dto::request::{CreateStudentRequest, UpdateStudentRequest};
use crate::error::{ApiError, validation_error};
use crate::extractors::ListParams;
use crate::state::AppState;

/// Student-specific list filters.
#[derive(Debug, Deserialize)]
pub struct StudentFilterParams {
    /// Restrict to one faculty, addressed by faculty code.
    pub faculty: Option<String>,
    /// Restrict to one cohort year.
    pub cohort_year: Option<i32>,
}

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    req.validate().map_err(validation_error)?;
    let student = state.student_service.create(req.into_create()).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/students
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filters): Query<StudentFilterParams>,
) -> Result<Json<PageResponse<Student>>, ApiError> {
    let page = params.page_request();
    let query = StudentListQuery {
        search_string: params.search_string,
        faculty_code: filters.faculty,
        cohort_year: filters.cohort_year,
    };
    let students = state.student_service.find_all(&page, query).await?;
    Ok(Json(students))
}

/// GET /api/students/all
pub async fn list_all_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(state.student_service.list_all().await?))
}

/// GET /api/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.student_service.get(&id).await?))
}

/// PATCH /api/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<Student>, ApiError> {
    req.validate().map_err(validation_error)?;
    let student = state.student_service.update(&id, req.into_update()).await?;
    Ok(Json(student))
}

/// DELETE /api/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.student_service.delete(&id).await?))
}

/// GET /api/students/{id}/transcript
///
/// Compiles the transcript from the student's grades and returns the
/// stored snapshot.
pub async fn get_student_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transcript>, ApiError> {
    Ok(Json(state.transcript_service.compile_for_student(&id).await?))
}
