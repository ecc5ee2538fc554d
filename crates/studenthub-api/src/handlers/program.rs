//! Program handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use studenthub_core::types::pagination::PageResponse;
use studenthub_entity::program::Program;

use crate::dto::request::{CreateProgramRequest, UpdateProgramRequest};
use crate::error::{ApiError, validation_error};
use crate::extractors::ListParams;
use crate::state::AppState;

/// POST /api/programs
pub async fn create_program(
    State(state): State<AppState>,
    Json(req): Json<CreateProgramRequest>,
) -> Result<(StatusCode, Json<Program>), ApiError> {
    req.validate().map_err(validation_error)?;
    let program = state.program_service.create(req.into_create()).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

/// GET /api/programs
pub async fn list_programs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse<Program>>, ApiError> {
    let page = params.page_request();
    let programs = state
        .program_service
        .find_all(&page, params.search_string)
        .await?;
    Ok(Json(programs))
}

/// GET /api/programs/all
pub async fn list_all_programs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Program>>, ApiError> {
    Ok(Json(state.program_service.list_all().await?))
}

/// GET /api/programs/{id}
pub async fn get_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Program>, ApiError> {
    Ok(Json(state.program_service.get(&id).await?))
}

/// PATCH /api/programs/{id}
pub async fn update_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProgramRequest>,
) -> Result<Json<Program>, ApiError> {
    req.validate().map_err(validation_error)?;
    let program = state.program_service.update(&id, req.into_update()).await?;
    Ok(Json(program))
}

/// DELETE /api/programs/{id}
pub async fn delete_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Program>, ApiError> {
    Ok(Json(state.program_service.delete(&id).await?))
}
