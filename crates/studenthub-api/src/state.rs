//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use studenthub_core::config::AppConfig;
use studenthub_database::DatabasePool;

use studenthub_database::repositories::course::CourseRepository;
use studenthub_database::repositories::enrollment::EnrollmentRepository;
use studenthub_database::repositories::faculty::FacultyRepository;
use studenthub_database::repositories::grade::GradeRepository;
use studenthub_database::repositories::open_class::OpenClassRepository;
use studenthub_database::repositories::program::ProgramRepository;
use studenthub_database::repositories::status::StudentStatusRepository;
use studenthub_database::repositories::student::StudentRepository;
use studenthub_database::repositories::transcript::TranscriptRepository;

use studenthub_service::course::CourseService;
use studenthub_service::enrollment::EnrollmentService;
use studenthub_service::faculty::FacultyService;
use studenthub_service::grade::GradeService;
use studenthub_service::open_class::OpenClassService;
use studenthub_service::program::ProgramService;
use studenthub_service::status::StudentStatusService;
use studenthub_service::student::StudentService;
use studenthub_service::transcript::TranscriptService;
use studenthub_service::transfer::TransferService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,

    // ── Repositories ─────────────────────────────────────────
    /// Student repository
    pub student_repo: Arc<StudentRepository>,
    /// Faculty repository
    pub faculty_repo: Arc<FacultyRepository>,
    /// Program repository
    pub program_repo: Arc<ProgramRepository>,
    /// Student status repository
    pub status_repo: Arc<StudentStatusRepository>,
    /// Course repository
    pub course_repo: Arc<CourseRepository>,
    /// Open class repository
    pub class_repo: Arc<OpenClassRepository>,
    /// Enrollment repository
    pub enrollment_repo: Arc<EnrollmentRepository>,
    /// Grade repository
    pub grade_repo: Arc<GradeRepository>,
    /// Transcript repository
    pub transcript_repo: Arc<TranscriptRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Student service
    pub student_service: Arc<StudentService>,
    /// Faculty service
    pub faculty_service: Arc<FacultyService>,
    /// Program service
    pub program_service: Arc<ProgramService>,
    /// Student status service
    pub status_service: Arc<StudentStatusService>,
    /// Course service
    pub course_service: Arc<CourseService>,
    /// Open class service
    pub class_service: Arc<OpenClassService>,
    /// Enrollment service
    pub enrollment_service: Arc<EnrollmentService>,
    /// Grade service
    pub grade_service: Arc<GradeService>,
    /// Transcript service
    pub transcript_service: Arc<TranscriptService>,
    /// Import/export service
    pub transfer_service: Arc<TransferService>,
}
