//! Student management: CRUD plus write-time business validation.

use std::sync::Arc;

use regex::Regex;
use tracing::{error, info};

use studenthub_core::config::validation::ValidationConfig;
use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_database::repositories::faculty::FacultyRepository;
use studenthub_database::repositories::program::ProgramRepository;
use studenthub_database::repositories::status::StudentStatusRepository;
use studenthub_database::repositories::student::StudentRepository;
use studenthub_entity::student::{CreateStudent, Student, UpdateStudent};

use crate::ident;

/// Columns the list keyword is matched against.
const KEYWORD_COLUMNS: &[&str] = &["code", "full_name", "email"];

/// Optional list filters for students.
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    /// Keyword matched against code, full name and email.
    pub search_string: Option<String>,
    /// Restrict to one faculty, addressed by faculty code.
    pub faculty_code: Option<String>,
    /// Restrict to one cohort year.
    pub cohort_year: Option<i32>,
}

/// Handles student CRUD and the write-time business rules.
#[derive(Debug, Clone)]
pub struct StudentService {
    repo: Arc<StudentRepository>,
    faculties: Arc<FacultyRepository>,
    programs: Arc<ProgramRepository>,
    statuses: Arc<StudentStatusRepository>,
    config: ValidationConfig,
    phone_regex: Regex,
}

impl StudentService {
    /// Creates a new student service.
    ///
    /// Fails when the configured phone pattern is not a valid regular
    /// expression.
    pub fn new(
        repo: Arc<StudentRepository>,
        faculties: Arc<FacultyRepository>,
        programs: Arc<ProgramRepository>,
        statuses: Arc<StudentStatusRepository>,
        config: ValidationConfig,
    ) -> AppResult<Self> {
        let phone_regex = Regex::new(&config.phone_pattern).map_err(|e| {
            AppError::configuration(format!(
                "Invalid phone pattern '{}': {e}",
                config.phone_pattern
            ))
        })?;

        Ok(Self {
            repo,
            faculties,
            programs,
            statuses,
            config,
            phone_regex,
        })
    }

    /// Creates a student.
    pub async fn create(&self, data: CreateStudent) -> AppResult<Student> {
        if data.code.trim().is_empty() {
            return Err(AppError::validation("Student code cannot be empty"));
        }
        if data.full_name.trim().is_empty() {
            return Err(AppError::validation("Student name cannot be empty"));
        }
        self.validate_email(&data.email)?;
        self.validate_phone(&data.phone)?;
        self.check_references(
            Some(data.faculty_id),
            Some(data.program_id),
            Some(data.status_id),
        )
        .await?;

        if self.repo.find_by_code(&data.code).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Student code '{}' already exists",
                data.code
            )));
        }

        let student = self
            .repo
            .create(&data)
            .await
            .inspect_err(|e| error!(code = %data.code, "Failed to create student: {e}"))?;

        info!(student_id = %student.id, code = %student.code, "Student created");
        Ok(student)
    }

    /// Lists students matching the query, paginated.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        query: StudentListQuery,
    ) -> AppResult<PageResponse<Student>> {
        let mut filter = SearchFilter::new();
        if let Some(keyword) = query.search_string {
            filter = filter.keyword(keyword, KEYWORD_COLUMNS);
        }
        if let Some(code) = query.faculty_code {
            let faculty = self
                .faculties
                .find_by_code(&code)
                .await?
                .ok_or_else(|| AppError::validation(format!("Unknown faculty code '{code}'")))?;
            filter = filter.exact_uuid("faculty_id", faculty.id);
        }
        if let Some(year) = query.cohort_year {
            filter = filter.exact_int("cohort_year", year as i64);
        }

        self.repo.find_all(page, &filter).await
    }

    /// Lists every active student.
    pub async fn list_all(&self) -> AppResult<Vec<Student>> {
        self.repo.list_all().await
    }

    /// Gets a student by id, rejecting malformed ids early.
    pub async fn get(&self, raw_id: &str) -> AppResult<Student> {
        let id = ident::parse_id(raw_id, "student")?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Student {id} not found")))
    }

    /// Applies a partial update.
    ///
    /// An empty patch is a documented no-op: the stored record is
    /// returned unchanged and `updated_at` is not refreshed.
    pub async fn update(&self, raw_id: &str, patch: UpdateStudent) -> AppResult<Student> {
        let id = ident::parse_id(raw_id, "student")?;
        if patch.is_empty() {
            return self.get(raw_id).await;
        }

        if let Some(email) = &patch.email {
            self.validate_email(email)?;
        }
        if let Some(phone) = &patch.phone {
            self.validate_phone(phone)?;
        }
        self.check_references(patch.faculty_id, patch.program_id, patch.status_id)
            .await?;

        let student = self
            .repo
            .update(id, &patch)
            .await
            .inspect_err(|e| error!(student_id = %id, "Failed to update student: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Student {id} not found")))?;

        info!(student_id = %student.id, "Student updated");
        Ok(student)
    }

    /// Soft-deletes a student.
    pub async fn delete(&self, raw_id: &str) -> AppResult<Student> {
        let id = ident::parse_id(raw_id, "student")?;
        let student = self
            .repo
            .soft_delete(id)
            .await
            .inspect_err(|e| error!(student_id = %id, "Failed to delete student: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Student {id} not found")))?;

        info!(student_id = %student.id, code = %student.code, "Student deleted");
        Ok(student)
    }

    /// Email must look like an address and, when domains are configured,
    /// belong to one of them.
    fn validate_email(&self, email: &str) -> AppResult<()> {
        let Some((local, domain)) = email.split_once('@') else {
            return Err(AppError::validation(format!("Invalid email '{email}'")));
        };
        if local.is_empty() || !domain.contains('.') {
            return Err(AppError::validation(format!("Invalid email '{email}'")));
        }
        if !self.config.allowed_email_domains.is_empty()
            && !self
                .config
                .allowed_email_domains
                .iter()
                .any(|allowed| domain.eq_ignore_ascii_case(allowed))
        {
            return Err(AppError::validation(format!(
                "Email domain '{domain}' is not accepted; allowed: {}",
                self.config.allowed_email_domains.join(", ")
            )));
        }
        Ok(())
    }

    /// Phone must match the configured pattern.
    fn validate_phone(&self, phone: &str) -> AppResult<()> {
        if !self.phone_regex.is_match(phone) {
            return Err(AppError::validation(format!(
                "Invalid phone number '{phone}'"
            )));
        }
        Ok(())
    }

    /// Reference ids must point at active records.
    async fn check_references(
        &self,
        faculty_id: Option<uuid::Uuid>,
        program_id: Option<uuid::Uuid>,
        status_id: Option<uuid::Uuid>,
    ) -> AppResult<()> {
        if let Some(id) = faculty_id {
            if self.faculties.find_by_id(id).await?.is_none() {
                return Err(AppError::validation(format!("Unknown faculty {id}")));
            }
        }
        if let Some(id) = program_id {
            if self.programs.find_by_id(id).await?.is_none() {
                return Err(AppError::validation(format!("Unknown program {id}")));
            }
        }
        if let Some(id) = status_id {
            if self.statuses.find_by_id(id).await?.is_none() {
                return Err(AppError::validation(format!("Unknown status {id}")));
            }
        }
        Ok(())
    }
}
