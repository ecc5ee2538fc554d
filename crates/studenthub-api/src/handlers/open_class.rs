//! Open class handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use studenthub_core::types::pagination::PageResponse;
use studenthub_entity::open_class::OpenClass;

use crate::dto::request::{CreateOpenClassRequest, UpdateOpenClassRequest};
use crate::error::{ApiError, validation_error};
use crate::extractors::ListParams;
use crate::state::AppState;

/// POST /api/classes
pub async fn create_class(
    State(state): State<AppState>,
    Json(req): Json<CreateOpenClassRequest>,
) -> Result<(StatusCode, Json<OpenClass>), ApiError> {
    req.validate().map_err(validation_error)?;
    let class = state.class_service.create(req.into_create()).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// GET /api/classes
pub async fn list_classes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse<OpenClass>>, ApiError> {
    let page = params.page_request();
    let classes = state
        .class_service
        .find_all(&page, params.search_string)
        .await?;
    Ok(Json(classes))
}

/// GET /api/classes/all
pub async fn list_all_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<OpenClass>>, ApiError> {
    Ok(Json(state.class_service.list_all().await?))
}

/// GET /api/classes/{id}
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OpenClass>, ApiError> {
    Ok(Json(state.class_service.get(&id).await?))
}

/// PATCH /api/classes/{id}
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateOpenClassRequest>,
) -> Result<Json<OpenClass>, ApiError> {
    req.validate().map_err(validation_error)?;
    let class = state.class_service.update(&id, req.into_update()).await?;
    Ok(Json(class))
}

/// DELETE /api/classes/{id}
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OpenClass>, ApiError> {
    Ok(Json(state.class_service.delete(&id).await?))
}
