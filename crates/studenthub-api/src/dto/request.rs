//! Request DTOs with field-level validation.
//!
//! Handlers run `validate()` before touching the service layer, so shape
//! errors surface as 400s with field messages. Business rules (email
//! domains, phone patterns, referential checks) stay in the services.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use studenthub_entity::LocalizedName;
use studenthub_entity::course::{CreateCourse, UpdateCourse};
use studenthub_entity::enrollment::CreateEnrollment;
use studenthub_entity::faculty::{CreateFaculty, UpdateFaculty};
use studenthub_entity::grade::{CreateGrade, UpdateGrade};
use studenthub_entity::open_class::{CreateOpenClass, UpdateOpenClass};
use studenthub_entity::program::{CreateProgram, UpdateProgram};
use studenthub_entity::status::{CreateStudentStatus, UpdateStudentStatus};
use studenthub_entity::student::{
    Address, CreateStudent, Gender, IdentityDocument, UpdateStudent,
};

/// Bilingual name payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocalizedNameDto {
    /// Vietnamese name.
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub vi: String,
    /// English name.
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub en: String,
}

impl From<LocalizedNameDto> for LocalizedName {
    fn from(dto: LocalizedNameDto) -> Self {
        LocalizedName::new(dto.vi, dto.en)
    }
}

/// Address payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressDto {
    /// Street and house number.
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub street: String,
    /// District.
    pub district: String,
    /// City or province.
    pub city: String,
    /// Country.
    pub country: String,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Address {
            street: dto.street,
            district: dto.district,
            city: dto.city,
            country: dto.country,
        }
    }
}

// ── Students ─────────────────────────────────────────────────

/// POST /api/students
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStudentRequest {
    /// Unique student code.
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub code: String,
    /// Full name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub full_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Faculty reference.
    pub faculty_id: Uuid,
    /// Program reference.
    pub program_id: Uuid,
    /// Status reference.
    pub status_id: Uuid,
    /// Cohort year.
    #[validate(range(min = 1990, max = 2100, message = "must be a plausible year"))]
    pub cohort_year: i32,
    /// Contact email.
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    /// Contact phone.
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub phone: String,
    /// Nationality.
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub nationality: String,
    /// Permanent address.
    #[validate(nested)]
    pub address: Option<AddressDto>,
    /// Identity document.
    pub identity_document: Option<IdentityDocument>,
}

impl CreateStudentRequest {
    /// Convert into the entity creation payload.
    pub fn into_create(self) -> CreateStudent {
        CreateStudent {
            code: self.code,
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            faculty_id: self.faculty_id,
            program_id: self.program_id,
            status_id: self.status_id,
            cohort_year: self.cohort_year,
            email: self.email,
            phone: self.phone,
            nationality: self.nationality,
            address: self.address.map(Into::into),
            identity_document: self.identity_document,
        }
    }
}

/// PATCH /api/students/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    /// New full name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub full_name: Option<String>,
    /// New date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// New gender.
    pub gender: Option<Gender>,
    /// New faculty reference.
    pub faculty_id: Option<Uuid>,
    /// New program reference.
    pub program_id: Option<Uuid>,
    /// New status reference.
    pub status_id: Option<Uuid>,
    /// New cohort year.
    #[validate(range(min = 1990, max = 2100, message = "must be a plausible year"))]
    pub cohort_year: Option<i32>,
    /// New email.
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New nationality.
    pub nationality: Option<String>,
    /// New address.
    #[validate(nested)]
    pub address: Option<AddressDto>,
    /// New identity document.
    pub identity_document: Option<IdentityDocument>,
}

impl UpdateStudentRequest {
    /// Convert into the entity patch payload.
    pub fn into_update(self) -> UpdateStudent {
        UpdateStudent {
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            faculty_id: self.faculty_id,
            program_id: self.program_id,
            status_id: self.status_id,
            cohort_year: self.cohort_year,
            email: self.email,
            phone: self.phone,
            nationality: self.nationality,
            address: self.address.map(Into::into),
            identity_document: self.identity_document,
        }
    }
}

// ── Faculties / programs / statuses ──────────────────────────

/// POST /api/faculties
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFacultyRequest {
    /// Unique faculty code.
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub code: String,
    /// Bilingual display name.
    #[validate(nested)]
    pub name: LocalizedNameDto,
}

impl CreateFacultyRequest {
    /// Convert into the entity creation payload.
    pub fn into_create(self) -> CreateFaculty {
        CreateFaculty {
            code: self.code,
            name: self.name.into(),
        }
    }
}

/// PATCH /api/faculties/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFacultyRequest {
    /// New faculty code.
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub code: Option<String>,
    /// New display name.
    #[validate(nested)]
    pub name: Option<LocalizedNameDto>,
}

impl UpdateFacultyRequest {
    /// Convert into the entity patch payload.
    pub fn into_update(self) -> UpdateFaculty {
        UpdateFaculty {
            code: self.code,
            name: self.name.map(Into::into),
        }
    }
}

/// POST /api/programs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProgramRequest {
    /// Unique program code.
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub code: String,
    /// Bilingual display name.
    #[validate(nested)]
    pub name: LocalizedNameDto,
}

impl CreateProgramRequest {
    /// Convert into the entity creation payload.
    pub fn into_create(self) -> CreateProgram {
        CreateProgram {
            code: self.code,
            name: self.name.into(),
        }
    }
}

/// PATCH /api/programs/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProgramRequest {
    /// New program code.
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub code: Option<String>,
    /// New display name.
    #[validate(nested)]
    pub name: Option<LocalizedNameDto>,
}

impl UpdateProgramRequest {
    /// Convert into the entity patch payload.
    pub fn into_update(self) -> UpdateProgram {
        UpdateProgram {
            code: self.code,
            name: self.name.map(Into::into),
        }
    }
}

/// POST /api/student-statuses
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStudentStatusRequest {
    /// Unique status code.
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub code: String,
    /// Bilingual display name.
    #[validate(nested)]
    pub name: LocalizedNameDto,
}

impl CreateStudentStatusRequest {
    /// Convert into the entity creation payload.
    pub fn into_create(self) -> CreateStudentStatus {
        CreateStudentStatus {
            code: self.code,
            name: self.name.into(),
        }
    }
}

/// PATCH /api/student-statuses/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateStudentStatusRequest {
    /// New status code.
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub code: Option<String>,
    /// New display name.
    #[validate(nested)]
    pub name: Option<LocalizedNameDto>,
}

impl UpdateStudentStatusRequest {
    /// Convert into the entity patch payload.
    pub fn into_update(self) -> UpdateStudentStatus {
        UpdateStudentStatus {
            code: self.code,
            name: self.name.map(Into::into),
        }
    }
}

// ── Courses / classes ────────────────────────────────────────

/// POST /api/courses
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCourseRequest {
    /// Unique course code.
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub code: String,
    /// Bilingual display name.
    #[validate(nested)]
    pub name: LocalizedNameDto,
    /// Number of credits.
    #[validate(range(min = 2, message = "must be at least 2"))]
    pub credits: i16,
    /// Faculty offering the course.
    pub faculty_id: Uuid,
    /// Course description.
    pub description: Option<String>,
    /// Prerequisite course, if any.
    pub prerequisite_course_id: Option<Uuid>,
}

impl CreateCourseRequest {
    /// Convert into the entity creation payload.
    pub fn into_create(self) -> CreateCourse {
        CreateCourse {
            code: self.code,
            name: self.name.into(),
            credits: self.credits,
            faculty_id: self.faculty_id,
            description: self.description,
            prerequisite_course_id: self.prerequisite_course_id,
        }
    }
}

/// PATCH /api/courses/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    /// New display name.
    #[validate(nested)]
    pub name: Option<LocalizedNameDto>,
    /// New credit count.
    #[validate(range(min = 2, message = "must be at least 2"))]
    pub credits: Option<i16>,
    /// New faculty reference.
    pub faculty_id: Option<Uuid>,
    /// New description.
    pub description: Option<String>,
}

impl UpdateCourseRequest {
    /// Convert into the entity patch payload.
    pub fn into_update(self) -> UpdateCourse {
        UpdateCourse {
            name: self.name.map(Into::into),
            credits: self.credits,
            faculty_id: self.faculty_id,
            description: self.description,
        }
    }
}

/// POST /api/classes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOpenClassRequest {
    /// Unique class code.
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub code: String,
    /// Course this class teaches.
    pub course_id: Uuid,
    /// Academic year, e.g. "2024-2025".
    #[validate(length(min = 4, message = "must name an academic year"))]
    pub academic_year: String,
    /// Semester within the year.
    #[validate(range(min = 1, max = 3, message = "must be 1, 2 or 3"))]
    pub semester: i16,
    /// Lecturer name.
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub lecturer: String,
    /// Maximum number of enrolled students.
    #[validate(range(min = 1, message = "must be positive"))]
    pub max_capacity: i32,
    /// Weekly schedule.
    pub schedule: String,
    /// Room.
    pub room: String,
}

impl CreateOpenClassRequest {
    /// Convert into the entity creation payload.
    pub fn into_create(self) -> CreateOpenClass {
        CreateOpenClass {
            code: self.code,
            course_id: self.course_id,
            academic_year: self.academic_year,
            semester: self.semester,
            lecturer: self.lecturer,
            max_capacity: self.max_capacity,
            schedule: self.schedule,
            room: self.room,
        }
    }
}

/// PATCH /api/classes/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateOpenClassRequest {
    /// New lecturer.
    #[validate(length(min = 1, message = "cannot be empty"))]
    pub lecturer: Option<String>,
    /// New capacity.
    #[validate(range(min = 1, message = "must be positive"))]
    pub max_capacity: Option<i32>,
    /// New schedule.
    pub schedule: Option<String>,
    /// New room.
    pub room: Option<String>,
}

impl UpdateOpenClassRequest {
    /// Convert into the entity patch payload.
    pub fn into_update(self) -> UpdateOpenClass {
        UpdateOpenClass {
            lecturer: self.lecturer,
            max_capacity: self.max_capacity,
            schedule: self.schedule,
            room: self.room,
        }
    }
}

// ── Enrollments / grades ─────────────────────────────────────

/// POST /api/enrollments
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEnrollmentRequest {
    /// Enrolling student.
    pub student_id: Uuid,
    /// Class to enroll in.
    pub class_id: Uuid,
}

impl CreateEnrollmentRequest {
    /// Convert into the entity creation payload.
    pub fn into_create(self) -> CreateEnrollment {
        CreateEnrollment {
            student_id: self.student_id,
            class_id: self.class_id,
        }
    }
}

/// POST /api/enrollments/{id}/cancel
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CancelEnrollmentRequest {
    /// Why the enrollment is cancelled.
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// POST /api/grades
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGradeRequest {
    /// Graded student.
    pub student_id: Uuid,
    /// Class the score was earned in.
    pub class_id: Uuid,
    /// Score on the 10-point scale.
    #[validate(range(min = 0.0, max = 10.0, message = "must be between 0 and 10"))]
    pub score: f64,
}

impl CreateGradeRequest {
    /// Convert into the entity creation payload.
    pub fn into_create(self) -> CreateGrade {
        CreateGrade {
            student_id: self.student_id,
            class_id: self.class_id,
            score: self.score,
        }
    }
}

/// PATCH /api/grades/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateGradeRequest {
    /// Corrected score.
    #[validate(range(min = 0.0, max = 10.0, message = "must be between 0 and 10"))]
    pub score: Option<f64>,
}

impl UpdateGradeRequest {
    /// Convert into the entity patch payload.
    pub fn into_update(self) -> UpdateGrade {
        UpdateGrade { score: self.score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_student_rejects_bad_email() {
        let req = CreateStudentRequest {
            code: "SV001".to_string(),
            full_name: "Nguyễn Văn An".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2003, 5, 20).unwrap(),
            gender: Gender::Male,
            faculty_id: Uuid::new_v4(),
            program_id: Uuid::new_v4(),
            status_id: Uuid::new_v4(),
            cohort_year: 2021,
            email: "not-an-email".to_string(),
            phone: "0912345678".to_string(),
            nationality: "Việt Nam".to_string(),
            address: None,
            identity_document: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_grade_score_range() {
        let req = CreateGradeRequest {
            student_id: Uuid::new_v4(),
            class_id: Uuid::new_v4(),
            score: 11.0,
        };
        assert!(req.validate().is_err());

        let req = CreateGradeRequest { score: 8.5, ..req };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(UpdateStudentRequest::default().validate().is_ok());
    }
}
