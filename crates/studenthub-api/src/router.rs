//! Route definitions for the StudentHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.transfer.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(student_routes())
        .merge(faculty_routes())
        .merge(program_routes())
        .merge(status_routes())
        .merge(course_routes())
        .merge(class_routes())
        .merge(enrollment_routes())
        .merge(grade_routes())
        .merge(transcript_routes())
        .merge(transfer_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Student CRUD and transcript compilation
fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/students", post(handlers::student::create_student))
        .route("/students", get(handlers::student::list_students))
        .route("/students/all", get(handlers::student::list_all_students))
        .route("/students/{id}", get(handlers::student::get_student))
        .route("/students/{id}", patch(handlers::student::update_student))
        .route("/students/{id}", delete(handlers::student::delete_student))
        .route(
            "/students/{id}/transcript",
            get(handlers::student::get_student_transcript),
        )
}

/// Faculty CRUD
fn faculty_routes() -> Router<AppState> {
    Router::new()
        .route("/faculties", post(handlers::faculty::create_faculty))
        .route("/faculties", get(handlers::faculty::list_faculties))
        .route("/faculties/all", get(handlers::faculty::list_all_faculties))
        .route("/faculties/{id}", get(handlers::faculty::get_faculty))
        .route("/faculties/{id}", patch(handlers::faculty::update_faculty))
        .route("/faculties/{id}", delete(handlers::faculty::delete_faculty))
}

/// Program CRUD
fn program_routes() -> Router<AppState> {
    Router::new()
        .route("/programs", post(handlers::program::create_program))
        .route("/programs", get(handlers::program::list_programs))
        .route("/programs/all", get(handlers::program::list_all_programs))
        .route("/programs/{id}", get(handlers::program::get_program))
        .route("/programs/{id}", patch(handlers::program::update_program))
        .route("/programs/{id}", delete(handlers::program::delete_program))
}

/// Student status CRUD
fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/student-statuses", post(handlers::status::create_status))
        .route("/student-statuses", get(handlers::status::list_statuses))
        .route(
            "/student-statuses/all",
            get(handlers::status::list_all_statuses),
        )
        .route("/student-statuses/{id}", get(handlers::status::get_status))
        .route(
            "/student-statuses/{id}",
            patch(handlers::status::update_status),
        )
        .route(
            "/student-statuses/{id}",
            delete(handlers::status::delete_status),
        )
}

/// Course CRUD
fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", post(handlers::course::create_course))
        .route("/courses", get(handlers::course::list_courses))
        .route("/courses/all", get(handlers::course::list_all_courses))
        .route("/courses/{id}", get(handlers::course::get_course))
        .route("/courses/{id}", patch(handlers::course::update_course))
        .route("/courses/{id}", delete(handlers::course::delete_course))
}

/// Open class CRUD
fn class_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", post(handlers::open_class::create_class))
        .route("/classes", get(handlers::open_class::list_classes))
        .route("/classes/all", get(handlers::open_class::list_all_classes))
        .route("/classes/{id}", get(handlers::open_class::get_class))
        .route("/classes/{id}", patch(handlers::open_class::update_class))
        .route("/classes/{id}", delete(handlers::open_class::delete_class))
}

/// Enrollment and cancellation
fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/enrollments",
            post(handlers::enrollment::create_enrollment),
        )
        .route("/enrollments", get(handlers::enrollment::list_enrollments))
        .route(
            "/enrollments/all",
            get(handlers::enrollment::list_all_enrollments),
        )
        .route(
            "/enrollments/{id}",
            get(handlers::enrollment::get_enrollment),
        )
        .route(
            "/enrollments/{id}/cancel",
            post(handlers::enrollment::cancel_enrollment),
        )
        .route(
            "/enrollments/{id}",
            delete(handlers::enrollment::delete_enrollment),
        )
}

/// Grade CRUD
fn grade_routes() -> Router<AppState> {
    Router::new()
        .route("/grades", post(handlers::grade::create_grade))
        .route("/grades", get(handlers::grade::list_grades))
        .route("/grades/all", get(handlers::grade::list_all_grades))
        .route("/grades/{id}", get(handlers::grade::get_grade))
        .route("/grades/{id}", patch(handlers::grade::update_grade))
        .route("/grades/{id}", delete(handlers::grade::delete_grade))
}

/// Transcript access
fn transcript_routes() -> Router<AppState> {
    Router::new()
        .route("/transcripts", get(handlers::transcript::list_transcripts))
        .route(
            "/transcripts/all",
            get(handlers::transcript::list_all_transcripts),
        )
        .route(
            "/transcripts/{id}",
            get(handlers::transcript::get_transcript),
        )
        .route(
            "/transcripts/{id}",
            delete(handlers::transcript::delete_transcript),
        )
}

/// Spreadsheet import/export
fn transfer_routes() -> Router<AppState> {
    Router::new()
        .route("/transfer/import/csv", post(handlers::transfer::import_csv))
        .route(
            "/transfer/import/excel",
            post(handlers::transfer::import_excel),
        )
        .route(
            "/transfer/export/students/csv",
            get(handlers::transfer::export_students_csv),
        )
        .route(
            "/transfer/export/students/excel",
            get(handlers::transfer::export_students_excel),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
