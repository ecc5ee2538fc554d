//! Spreadsheet import/export of student records.
//!
//! Export denormalizes reference ids into display names through maps
//! preloaded from the repositories; import resolves display codes or
//! names back into ids and funnels every row through the student
//! service, so imported records obey the same business rules as records
//! created over the API. Rows that fail resolution or validation are
//! reported individually; valid rows are still created.

pub mod export;
pub mod import;
pub mod row;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use studenthub_core::config::transfer::TransferConfig;
use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_database::repositories::faculty::FacultyRepository;
use studenthub_database::repositories::program::ProgramRepository;
use studenthub_database::repositories::status::StudentStatusRepository;
use studenthub_database::repositories::student::StudentRepository;

use crate::student::StudentService;
use self::row::{ReferenceIds, ReferenceNames, StudentRow};

/// Supported spreadsheet formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    /// Comma-separated values.
    Csv,
    /// Excel workbook.
    Xlsx,
}

/// Outcome of one import row that was not created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRowError {
    /// 1-based file row (the header is row 1).
    pub row: usize,
    /// What went wrong.
    pub message: String,
}

/// Summary of an import run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// Number of students created.
    pub created: usize,
    /// Rows that were skipped, with reasons.
    pub errors: Vec<ImportRowError>,
}

/// Orchestrates spreadsheet import and export of students.
#[derive(Debug, Clone)]
pub struct TransferService {
    students: Arc<StudentService>,
    student_repo: Arc<StudentRepository>,
    faculties: Arc<FacultyRepository>,
    programs: Arc<ProgramRepository>,
    statuses: Arc<StudentStatusRepository>,
    config: TransferConfig,
}

impl TransferService {
    /// Creates a new transfer service.
    pub fn new(
        students: Arc<StudentService>,
        student_repo: Arc<StudentRepository>,
        faculties: Arc<FacultyRepository>,
        programs: Arc<ProgramRepository>,
        statuses: Arc<StudentStatusRepository>,
        config: TransferConfig,
    ) -> Self {
        Self {
            students,
            student_repo,
            faculties,
            programs,
            statuses,
            config,
        }
    }

    /// Export all active students in the requested format.
    pub async fn export_students(&self, format: TransferFormat) -> AppResult<Vec<u8>> {
        let students = self.student_repo.list_all().await?;
        let names = self.load_reference_names().await?;

        let rows: Vec<StudentRow> = students
            .iter()
            .map(|student| StudentRow::from_student(student, &names))
            .collect();

        info!(count = rows.len(), ?format, "Exporting students");
        match format {
            TransferFormat::Csv => export::to_csv(&rows),
            TransferFormat::Xlsx => export::to_xlsx(&rows),
        }
    }

    /// Import students from an uploaded file.
    ///
    /// The whole file is parsed first; rows are then created one by one,
    /// collecting per-row failures instead of aborting the run.
    pub async fn import_students(
        &self,
        format: TransferFormat,
        data: &[u8],
    ) -> AppResult<ImportReport> {
        let rows = match format {
            TransferFormat::Csv => import::parse_csv(data)?,
            TransferFormat::Xlsx => import::parse_xlsx(data)?,
        };
        if rows.len() > self.config.max_import_rows {
            return Err(AppError::validation(format!(
                "Import exceeds the limit of {} rows ({} found)",
                self.config.max_import_rows,
                rows.len()
            )));
        }

        let refs = self.load_reference_ids().await?;

        let mut report = ImportReport {
            created: 0,
            errors: Vec::new(),
        };
        for (index, row) in rows.iter().enumerate() {
            // Header occupies file row 1; data starts at row 2.
            let file_row = index + 2;
            let outcome = match row.to_create(&refs) {
                Ok(create) => self.students.create(create).await.map(|_| ()),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(()) => report.created += 1,
                Err(e) => report.errors.push(ImportRowError {
                    row: file_row,
                    message: e.message,
                }),
            }
        }

        info!(
            created = report.created,
            failed = report.errors.len(),
            ?format,
            "Import finished"
        );
        Ok(report)
    }

    /// Preload id → display-name maps for export.
    async fn load_reference_names(&self) -> AppResult<ReferenceNames> {
        let mut names = ReferenceNames::default();
        for faculty in self.faculties.list_all().await? {
            names.faculties.insert(faculty.id, faculty.name.display().to_string());
        }
        for program in self.programs.list_all().await? {
            names.programs.insert(program.id, program.name.display().to_string());
        }
        for status in self.statuses.list_all().await? {
            names.statuses.insert(status.id, status.name.display().to_string());
        }
        Ok(names)
    }

    /// Preload display-value → id maps for import. Codes and both display
    /// names all resolve to the same id.
    async fn load_reference_ids(&self) -> AppResult<ReferenceIds> {
        let mut refs = ReferenceIds::default();
        for faculty in self.faculties.list_all().await? {
            refs.faculties.insert(faculty.code.clone(), faculty.id);
            refs.faculties.insert(faculty.name.vi.clone(), faculty.id);
            refs.faculties.insert(faculty.name.en.clone(), faculty.id);
        }
        for program in self.programs.list_all().await? {
            refs.programs.insert(program.code.clone(), program.id);
            refs.programs.insert(program.name.vi.clone(), program.id);
            refs.programs.insert(program.name.en.clone(), program.id);
        }
        for status in self.statuses.list_all().await? {
            refs.statuses.insert(status.code.clone(), status.id);
            refs.statuses.insert(status.name.vi.clone(), status.id);
            refs.statuses.insert(status.name.en.clone(), status.id);
        }
        Ok(refs)
    }
}
