//! Transcript compilation and access.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_core::types::filter::SearchFilter;
use studenthub_core::types::pagination::{PageRequest, PageResponse};
use studenthub_database::repositories::grade::{GradeRepository, StudentGradeRow};
use studenthub_database::repositories::student::StudentRepository;
use studenthub_database::repositories::transcript::TranscriptRepository;
use studenthub_entity::grade::{grade_points, letter_grade};
use studenthub_entity::transcript::{Transcript, TranscriptRow};

use crate::ident;

/// Compiles and serves transcript snapshots.
#[derive(Debug, Clone)]
pub struct TranscriptService {
    repo: Arc<TranscriptRepository>,
    grades: Arc<GradeRepository>,
    students: Arc<StudentRepository>,
}

impl TranscriptService {
    /// Creates a new transcript service.
    pub fn new(
        repo: Arc<TranscriptRepository>,
        grades: Arc<GradeRepository>,
        students: Arc<StudentRepository>,
    ) -> Self {
        Self {
            repo,
            grades,
            students,
        }
    }

    /// Compiles the transcript for a student from their active grades and
    /// stores it, replacing any previous snapshot.
    pub async fn compile_for_student(&self, raw_student_id: &str) -> AppResult<Transcript> {
        let student_id = ident::parse_id(raw_student_id, "student")?;
        if self.students.find_by_id(student_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Student {student_id} not found"
            )));
        }

        let source = self.grades.transcript_rows(student_id).await?;
        let rows = compile_rows(&source);
        let gpa = weighted_gpa(&rows);

        let transcript = self
            .repo
            .upsert_for_student(student_id, &rows, gpa)
            .await
            .inspect_err(|e| error!(student_id = %student_id, "Failed to store transcript: {e}"))?;

        info!(
            student_id = %student_id,
            courses = rows.len(),
            gpa,
            "Transcript compiled"
        );
        Ok(transcript)
    }

    /// Lists transcripts, optionally scoped to one student.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        student_id: Option<Uuid>,
    ) -> AppResult<PageResponse<Transcript>> {
        let mut filter = SearchFilter::new();
        if let Some(student_id) = student_id {
            filter = filter.exact_uuid("student_id", student_id);
        }
        self.repo.find_all(page, &filter).await
    }

    /// Lists every active transcript.
    pub async fn list_all(&self) -> AppResult<Vec<Transcript>> {
        self.repo.list_all().await
    }

    /// Gets a transcript by id, rejecting malformed ids early.
    pub async fn get(&self, raw_id: &str) -> AppResult<Transcript> {
        let id = ident::parse_id(raw_id, "transcript")?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Transcript {id} not found")))
    }

    /// Soft-deletes a transcript snapshot.
    pub async fn delete(&self, raw_id: &str) -> AppResult<Transcript> {
        let id = ident::parse_id(raw_id, "transcript")?;
        let transcript = self
            .repo
            .soft_delete(id)
            .await
            .inspect_err(|e| error!(transcript_id = %id, "Failed to delete transcript: {e}"))?
            .ok_or_else(|| AppError::not_found(format!("Transcript {id} not found")))?;

        info!(transcript_id = %transcript.id, "Transcript deleted");
        Ok(transcript)
    }
}

/// Derive letter grades and 4-point values for the source rows.
fn compile_rows(source: &[StudentGradeRow]) -> Vec<TranscriptRow> {
    source
        .iter()
        .map(|row| TranscriptRow {
            course_code: row.course_code.clone(),
            course_name: row.course_name.vi.clone(),
            credits: row.credits,
            score: row.score,
            letter: letter_grade(row.score).to_string(),
            points: grade_points(row.score),
        })
        .collect()
}

/// Credit-weighted GPA on the 4-point scale, rounded to two decimals.
fn weighted_gpa(rows: &[TranscriptRow]) -> f64 {
    let total_credits: i64 = rows.iter().map(|r| r.credits as i64).sum();
    if total_credits == 0 {
        return 0.0;
    }
    let weighted: f64 = rows.iter().map(|r| r.points * r.credits as f64).sum();
    (weighted / total_credits as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;
    use studenthub_entity::localized::LocalizedName;

    fn source_row(code: &str, credits: i16, score: f64) -> StudentGradeRow {
        StudentGradeRow {
            course_code: code.to_string(),
            course_name: Json(LocalizedName::new(code, code)),
            credits,
            score,
        }
    }

    #[test]
    fn test_compile_derives_letters() {
        let rows = compile_rows(&[source_row("CS101", 4, 9.0), source_row("CS102", 2, 6.0)]);
        assert_eq!(rows[0].letter, "A");
        assert_eq!(rows[0].points, 4.0);
        assert_eq!(rows[1].letter, "C");
        assert_eq!(rows[1].points, 2.0);
    }

    #[test]
    fn test_gpa_is_credit_weighted() {
        let rows = compile_rows(&[source_row("CS101", 4, 9.0), source_row("CS102", 2, 6.0)]);
        // (4.0 * 4 + 2.0 * 2) / 6 = 20 / 6 = 3.33
        assert_eq!(weighted_gpa(&rows), 3.33);
    }

    #[test]
    fn test_gpa_empty_is_zero() {
        assert_eq!(weighted_gpa(&[]), 0.0);
    }
}
