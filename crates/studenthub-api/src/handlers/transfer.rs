//! Spreadsheet import/export handlers.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use studenthub_core::error::AppError;
use studenthub_service::transfer::{ImportReport, TransferFormat};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/transfer/import/csv
pub async fn import_csv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportReport>, ApiError> {
    let data = read_upload(multipart).await?;
    let report = state
        .transfer_service
        .import_students(TransferFormat::Csv, &data)
        .await?;
    Ok(Json(report))
}

/// POST /api/transfer/import/excel
pub async fn import_excel(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportReport>, ApiError> {
    let data = read_upload(multipart).await?;
    let report = state
        .transfer_service
        .import_students(TransferFormat::Xlsx, &data)
        .await?;
    Ok(Json(report))
}

/// GET /api/transfer/export/students/csv
pub async fn export_students_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let bytes = state
        .transfer_service
        .export_students(TransferFormat::Csv)
        .await?;
    Ok(attachment(bytes, "text/csv; charset=utf-8", "students.csv"))
}

/// GET /api/transfer/export/students/excel
pub async fn export_students_excel(State(state): State<AppState>) -> Result<Response, ApiError> {
    let bytes = state
        .transfer_service
        .export_students(TransferFormat::Xlsx)
        .await?;
    Ok(attachment(
        bytes,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "students.xlsx",
    ))
}

/// Pull the uploaded file out of the multipart body.
///
/// Accepts the field named `file`, or the first field carrying data when
/// no field has that name. The whole upload lands in memory; the router's
/// body limit bounds its size.
async fn read_upload(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    let mut fallback: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(AppError::validation(format!("Malformed upload: {e}"))))?
    {
        let is_file_field = field.name() == Some("file");
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError(AppError::validation(format!("Failed to read upload: {e}"))))?;

        if is_file_field {
            return Ok(data.to_vec());
        }
        if fallback.is_none() && !data.is_empty() {
            fallback = Some(data.to_vec());
        }
    }

    fallback.ok_or_else(|| ApiError(AppError::validation("Upload contains no file")))
}

/// Build a download response with the right MIME type and filename.
fn attachment(bytes: Vec<u8>, content_type: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
