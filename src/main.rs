//! StudentHub Server — student records management backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use studenthub_core::config::AppConfig;
use studenthub_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("STUDENTHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting StudentHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = studenthub_database::DatabasePool::connect(&config.database).await?;
    studenthub_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Initialize repositories ──────────────────────────
    let pool = db.pool().clone();
    let student_repo = Arc::new(
        studenthub_database::repositories::student::StudentRepository::new(pool.clone()),
    );
    let faculty_repo = Arc::new(
        studenthub_database::repositories::faculty::FacultyRepository::new(pool.clone()),
    );
    let program_repo = Arc::new(
        studenthub_database::repositories::program::ProgramRepository::new(pool.clone()),
    );
    let status_repo = Arc::new(
        studenthub_database::repositories::status::StudentStatusRepository::new(pool.clone()),
    );
    let course_repo = Arc::new(
        studenthub_database::repositories::course::CourseRepository::new(pool.clone()),
    );
    let class_repo = Arc::new(
        studenthub_database::repositories::open_class::OpenClassRepository::new(pool.clone()),
    );
    let enrollment_repo = Arc::new(
        studenthub_database::repositories::enrollment::EnrollmentRepository::new(pool.clone()),
    );
    let grade_repo = Arc::new(studenthub_database::repositories::grade::GradeRepository::new(
        pool.clone(),
    ));
    let transcript_repo = Arc::new(
        studenthub_database::repositories::transcript::TranscriptRepository::new(pool.clone()),
    );

    // ── Step 3: Initialize services ──────────────────────────────
    let student_service = Arc::new(studenthub_service::student::StudentService::new(
        Arc::clone(&student_repo),
        Arc::clone(&faculty_repo),
        Arc::clone(&program_repo),
        Arc::clone(&status_repo),
        config.validation.clone(),
    )?);
    let faculty_service = Arc::new(studenthub_service::faculty::FacultyService::new(Arc::clone(
        &faculty_repo,
    )));
    let program_service = Arc::new(studenthub_service::program::ProgramService::new(Arc::clone(
        &program_repo,
    )));
    let status_service = Arc::new(studenthub_service::status::StudentStatusService::new(
        Arc::clone(&status_repo),
    ));
    let course_service = Arc::new(studenthub_service::course::CourseService::new(
        Arc::clone(&course_repo),
        Arc::clone(&faculty_repo),
    ));
    let class_service = Arc::new(studenthub_service::open_class::OpenClassService::new(
        Arc::clone(&class_repo),
        Arc::clone(&course_repo),
    ));
    let enrollment_service = Arc::new(studenthub_service::enrollment::EnrollmentService::new(
        Arc::clone(&enrollment_repo),
        Arc::clone(&student_repo),
        Arc::clone(&class_repo),
    ));
    let grade_service = Arc::new(studenthub_service::grade::GradeService::new(
        Arc::clone(&grade_repo),
        Arc::clone(&enrollment_repo),
    ));
    let transcript_service = Arc::new(studenthub_service::transcript::TranscriptService::new(
        Arc::clone(&transcript_repo),
        Arc::clone(&grade_repo),
        Arc::clone(&student_repo),
    ));
    let transfer_service = Arc::new(studenthub_service::transfer::TransferService::new(
        Arc::clone(&student_service),
        Arc::clone(&student_repo),
        Arc::clone(&faculty_repo),
        Arc::clone(&program_repo),
        Arc::clone(&status_repo),
        config.transfer.clone(),
    ));

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app_state = studenthub_api::state::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        student_repo,
        faculty_repo,
        program_repo,
        status_repo,
        course_repo,
        class_repo,
        enrollment_repo,
        grade_repo,
        transcript_repo,
        student_service,
        faculty_service,
        program_service,
        status_service,
        course_service,
        class_service,
        enrollment_service,
        grade_service,
        transcript_service,
        transfer_service,
    };

    let app = studenthub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("StudentHub server listening on {addr}");

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("StudentHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
