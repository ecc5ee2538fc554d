//! Flat spreadsheet row shape for student records.
//!
//! One [`StudentRow`] is one line of a CSV/Excel file. Columns carry
//! Vietnamese labels with snake_case fallback keys, so files produced by
//! this system and files hand-edited with either header style both
//! import. Reference columns hold display values (resolved back to ids on
//! import), and the identity document is flattened into type-conditional
//! columns filled only for the relevant document kind.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;
use studenthub_entity::student::{Address, CreateStudent, Gender, IdentityDocument, Student};

/// A spreadsheet column: Vietnamese label plus snake_case fallback key.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Human-readable header in the operating language.
    pub label: &'static str,
    /// Fallback header key.
    pub key: &'static str,
}

/// Number of columns in a student row.
pub const COLUMN_COUNT: usize = 22;

/// The column set, in file order.
pub const COLUMNS: [Column; COLUMN_COUNT] = [
    Column { label: "Mã số sinh viên", key: "student_code" },
    Column { label: "Họ tên", key: "full_name" },
    Column { label: "Ngày sinh", key: "date_of_birth" },
    Column { label: "Giới tính", key: "gender" },
    Column { label: "Khoa", key: "faculty" },
    Column { label: "Chương trình", key: "program" },
    Column { label: "Tình trạng", key: "status" },
    Column { label: "Khóa", key: "cohort_year" },
    Column { label: "Email", key: "email" },
    Column { label: "Số điện thoại", key: "phone" },
    Column { label: "Quốc tịch", key: "nationality" },
    Column { label: "Địa chỉ - Đường", key: "address_street" },
    Column { label: "Địa chỉ - Quận/Huyện", key: "address_district" },
    Column { label: "Địa chỉ - Tỉnh/Thành phố", key: "address_city" },
    Column { label: "Địa chỉ - Quốc gia", key: "address_country" },
    Column { label: "Loại giấy tờ", key: "document_type" },
    Column { label: "Số giấy tờ", key: "document_number" },
    Column { label: "Ngày cấp", key: "document_issued_date" },
    Column { label: "Nơi cấp", key: "document_issued_place" },
    Column { label: "Có gắn chip", key: "document_has_chip" },
    Column { label: "Quốc gia cấp", key: "document_country" },
    Column { label: "Ghi chú", key: "document_notes" },
];

/// Preloaded id → display-name maps used when exporting.
#[derive(Debug, Default)]
pub struct ReferenceNames {
    /// Faculty id → display name.
    pub faculties: HashMap<Uuid, String>,
    /// Program id → display name.
    pub programs: HashMap<Uuid, String>,
    /// Status id → display name.
    pub statuses: HashMap<Uuid, String>,
}

/// Preloaded display-value → id maps used when importing.
///
/// Keyed by code *and* by both display names, so an exported file (names)
/// and a hand-written file (codes) both resolve.
#[derive(Debug, Default)]
pub struct ReferenceIds {
    /// Faculty code/name → id.
    pub faculties: HashMap<String, Uuid>,
    /// Program code/name → id.
    pub programs: HashMap<String, Uuid>,
    /// Status code/name → id.
    pub statuses: HashMap<String, Uuid>,
}

/// One student as a flat row of display strings.
///
/// Missing optionals are empty strings in both directions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentRow {
    pub code: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub faculty: String,
    pub program: String,
    pub status: String,
    pub cohort_year: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub address_street: String,
    pub address_district: String,
    pub address_city: String,
    pub address_country: String,
    pub document_type: String,
    pub document_number: String,
    pub document_issued_date: String,
    pub document_issued_place: String,
    pub document_has_chip: String,
    pub document_country: String,
    pub document_notes: String,
}

impl StudentRow {
    /// Header labels in file order.
    pub fn labels() -> [&'static str; COLUMN_COUNT] {
        let mut labels = [""; COLUMN_COUNT];
        for (i, column) in COLUMNS.iter().enumerate() {
            labels[i] = column.label;
        }
        labels
    }

    /// Cell values in file order.
    pub fn values(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.code,
            &self.full_name,
            &self.date_of_birth,
            &self.gender,
            &self.faculty,
            &self.program,
            &self.status,
            &self.cohort_year,
            &self.email,
            &self.phone,
            &self.nationality,
            &self.address_street,
            &self.address_district,
            &self.address_city,
            &self.address_country,
            &self.document_type,
            &self.document_number,
            &self.document_issued_date,
            &self.document_issued_place,
            &self.document_has_chip,
            &self.document_country,
            &self.document_notes,
        ]
    }

    /// Flatten a stored student into a row, denormalizing reference ids
    /// into display names. Unknown references become empty cells.
    pub fn from_student(student: &Student, names: &ReferenceNames) -> Self {
        let mut row = Self {
            code: student.code.clone(),
            full_name: student.full_name.clone(),
            date_of_birth: student.date_of_birth.format("%Y-%m-%d").to_string(),
            gender: student.gender.display_label().to_string(),
            faculty: names
                .faculties
                .get(&student.faculty_id)
                .cloned()
                .unwrap_or_default(),
            program: names
                .programs
                .get(&student.program_id)
                .cloned()
                .unwrap_or_default(),
            status: names
                .statuses
                .get(&student.status_id)
                .cloned()
                .unwrap_or_default(),
            cohort_year: student.cohort_year.to_string(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            nationality: student.nationality.clone(),
            ..Self::default()
        };

        if let Some(address) = &student.address {
            row.address_street = address.street.clone();
            row.address_district = address.district.clone();
            row.address_city = address.city.clone();
            row.address_country = address.country.clone();
        }

        if let Some(document) = &student.identity_document {
            row.document_number = document.number().to_string();
            row.document_issued_date = document.issued_date().format("%Y-%m-%d").to_string();
            row.document_issued_place = document.issued_place().to_string();
            match &**document {
                IdentityDocument::Cmnd { .. } => {
                    row.document_type = "CMND".to_string();
                }
                IdentityDocument::Cccd { has_chip, .. } => {
                    row.document_type = "CCCD".to_string();
                    row.document_has_chip = if *has_chip { "Có" } else { "Không" }.to_string();
                }
                IdentityDocument::Passport { country, notes, .. } => {
                    row.document_type = "Hộ chiếu".to_string();
                    row.document_country = country.clone();
                    row.document_notes = notes.clone().unwrap_or_default();
                }
            }
        }

        row
    }

    /// Rebuild a row from file cells using the resolved header positions.
    pub fn from_cells(cells: &[String], positions: &[Option<usize>; COLUMN_COUNT]) -> Self {
        let cell = |i: usize| -> String {
            positions[i]
                .and_then(|pos| cells.get(pos))
                .map(|c| c.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            code: cell(0),
            full_name: cell(1),
            date_of_birth: cell(2),
            gender: cell(3),
            faculty: cell(4),
            program: cell(5),
            status: cell(6),
            cohort_year: cell(7),
            email: cell(8),
            phone: cell(9),
            nationality: cell(10),
            address_street: cell(11),
            address_district: cell(12),
            address_city: cell(13),
            address_country: cell(14),
            document_type: cell(15),
            document_number: cell(16),
            document_issued_date: cell(17),
            document_issued_place: cell(18),
            document_has_chip: cell(19),
            document_country: cell(20),
            document_notes: cell(21),
        }
    }

    /// Resolve the row back into creation data, mapping display values to
    /// reference ids.
    pub fn to_create(&self, refs: &ReferenceIds) -> AppResult<CreateStudent> {
        if self.code.is_empty() {
            return Err(AppError::validation("Missing student code"));
        }
        if self.full_name.is_empty() {
            return Err(AppError::validation("Missing student name"));
        }

        let date_of_birth = parse_date(&self.date_of_birth)
            .ok_or_else(|| AppError::validation(format!("Invalid date of birth '{}'", self.date_of_birth)))?;
        let gender = Gender::from_label(&self.gender)
            .ok_or_else(|| AppError::validation(format!("Invalid gender '{}'", self.gender)))?;
        let cohort_year: i32 = self
            .cohort_year
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid cohort year '{}'", self.cohort_year)))?;

        let faculty_id = resolve_reference(&refs.faculties, &self.faculty, "faculty")?;
        let program_id = resolve_reference(&refs.programs, &self.program, "program")?;
        let status_id = resolve_reference(&refs.statuses, &self.status, "status")?;

        let address = if self.address_street.is_empty()
            && self.address_district.is_empty()
            && self.address_city.is_empty()
            && self.address_country.is_empty()
        {
            None
        } else {
            Some(Address {
                street: self.address_street.clone(),
                district: self.address_district.clone(),
                city: self.address_city.clone(),
                country: self.address_country.clone(),
            })
        };

        Ok(CreateStudent {
            code: self.code.clone(),
            full_name: self.full_name.clone(),
            date_of_birth,
            gender,
            faculty_id,
            program_id,
            status_id,
            cohort_year,
            email: self.email.clone(),
            phone: self.phone.clone(),
            nationality: self.nationality.clone(),
            address,
            identity_document: self.parse_document()?,
        })
    }

    /// Reassemble the identity document from its conditional columns.
    fn parse_document(&self) -> AppResult<Option<IdentityDocument>> {
        if self.document_type.is_empty() {
            return Ok(None);
        }

        let issued_date = parse_date(&self.document_issued_date).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid document issue date '{}'",
                self.document_issued_date
            ))
        })?;
        let number = self.document_number.clone();
        let issued_place = self.document_issued_place.clone();

        let document = match self.document_type.to_lowercase().as_str() {
            "cmnd" => IdentityDocument::Cmnd {
                number,
                issued_date,
                issued_place,
            },
            "cccd" => IdentityDocument::Cccd {
                number,
                issued_date,
                issued_place,
                has_chip: is_truthy(&self.document_has_chip),
            },
            "hộ chiếu" | "ho chieu" | "passport" => IdentityDocument::Passport {
                number,
                issued_date,
                issued_place,
                country: self.document_country.clone(),
                notes: if self.document_notes.is_empty() {
                    None
                } else {
                    Some(self.document_notes.clone())
                },
            },
            other => {
                return Err(AppError::validation(format!(
                    "Unknown document type '{other}'"
                )));
            }
        };

        Ok(Some(document))
    }
}

/// Map each of our columns to its position in the file's header row.
///
/// A header cell matches a column by exact label or by case-insensitive
/// fallback key. Student code and name columns are required.
pub fn resolve_headers(headers: &[String]) -> AppResult<[Option<usize>; COLUMN_COUNT]> {
    let mut positions = [None; COLUMN_COUNT];
    for (i, column) in COLUMNS.iter().enumerate() {
        positions[i] = headers.iter().position(|h| {
            let h = h.trim();
            h == column.label || h.eq_ignore_ascii_case(column.key)
        });
    }

    if positions[0].is_none() || positions[1].is_none() {
        return Err(AppError::validation(format!(
            "Missing required columns '{}' and '{}'",
            COLUMNS[0].label, COLUMNS[1].label
        )));
    }
    Ok(positions)
}

/// Dates accepted in ISO or Vietnamese day-first form.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}

/// "Có"/yes-style cells mark a chip card.
fn is_truthy(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "có" | "co" | "x" | "1" | "true" | "yes"
    )
}

/// Resolve a display cell (code or name) into a reference id.
fn resolve_reference(
    map: &HashMap<String, Uuid>,
    cell: &str,
    entity: &str,
) -> AppResult<Uuid> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Err(AppError::validation(format!("Missing {entity}")));
    }
    map.get(cell)
        .copied()
        .ok_or_else(|| AppError::validation(format!("Unknown {entity} '{cell}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sqlx::types::Json;

    fn sample_ids() -> (Uuid, Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
    }

    fn sample_student(faculty_id: Uuid, program_id: Uuid, status_id: Uuid) -> Student {
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap();
        Student {
            id: Uuid::new_v4(),
            code: "SV001".to_string(),
            full_name: "Nguyễn Văn An".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2003, 5, 20).unwrap(),
            gender: Gender::Male,
            faculty_id,
            program_id,
            status_id,
            cohort_year: 2021,
            email: "an.nguyen@student.university.edu.vn".to_string(),
            phone: "0912345678".to_string(),
            nationality: "Việt Nam".to_string(),
            address: Some(Json(Address {
                street: "123 Nguyễn Trãi".to_string(),
                district: "Quận 5".to_string(),
                city: "TP. Hồ Chí Minh".to_string(),
                country: "Việt Nam".to_string(),
            })),
            identity_document: Some(Json(IdentityDocument::Cccd {
                number: "012345678901".to_string(),
                issued_date: NaiveDate::from_ymd_opt(2021, 3, 15).unwrap(),
                issued_place: "Hà Nội".to_string(),
                has_chip: true,
            })),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn reference_fixtures(
        faculty_id: Uuid,
        program_id: Uuid,
        status_id: Uuid,
    ) -> (ReferenceNames, ReferenceIds) {
        let mut names = ReferenceNames::default();
        names
            .faculties
            .insert(faculty_id, "Công Nghệ Thông Tin".to_string());
        names.programs.insert(program_id, "Chính quy".to_string());
        names.statuses.insert(status_id, "Đang học".to_string());

        let mut ids = ReferenceIds::default();
        for key in ["CNTT", "Công Nghệ Thông Tin"] {
            ids.faculties.insert(key.to_string(), faculty_id);
        }
        for key in ["CQ", "Chính quy"] {
            ids.programs.insert(key.to_string(), program_id);
        }
        for key in ["DH", "Đang học"] {
            ids.statuses.insert(key.to_string(), status_id);
        }
        (names, ids)
    }

    #[test]
    fn test_round_trip_preserves_references() {
        let (faculty_id, program_id, status_id) = sample_ids();
        let student = sample_student(faculty_id, program_id, status_id);
        let (names, ids) = reference_fixtures(faculty_id, program_id, status_id);

        let row = StudentRow::from_student(&student, &names);
        assert_eq!(row.faculty, "Công Nghệ Thông Tin");
        assert_eq!(row.document_type, "CCCD");
        assert_eq!(row.document_has_chip, "Có");

        let create = row.to_create(&ids).unwrap();
        assert_eq!(create.code, student.code);
        assert_eq!(create.faculty_id, faculty_id);
        assert_eq!(create.program_id, program_id);
        assert_eq!(create.status_id, status_id);
        assert_eq!(create.date_of_birth, student.date_of_birth);
        assert_eq!(
            create.identity_document,
            Some(student.identity_document.as_ref().unwrap().0.clone())
        );
        assert_eq!(create.address, Some(student.address.as_ref().unwrap().0.clone()));
    }

    #[test]
    fn test_code_cell_resolves_like_name_cell() {
        let (faculty_id, program_id, status_id) = sample_ids();
        let (_, ids) = reference_fixtures(faculty_id, program_id, status_id);
        let student = sample_student(faculty_id, program_id, status_id);
        let (names, _) = reference_fixtures(faculty_id, program_id, status_id);

        let mut row = StudentRow::from_student(&student, &names);
        row.faculty = "CNTT".to_string();
        let create = row.to_create(&ids).unwrap();
        assert_eq!(create.faculty_id, faculty_id);
    }

    #[test]
    fn test_header_resolution_accepts_fallback_keys() {
        let headers: Vec<String> = vec![
            "student_code".to_string(),
            "FULL_NAME".to_string(),
            "Ngày sinh".to_string(),
        ];
        let positions = resolve_headers(&headers).unwrap();
        assert_eq!(positions[0], Some(0));
        assert_eq!(positions[1], Some(1));
        assert_eq!(positions[2], Some(2));
        assert_eq!(positions[3], None);
    }

    #[test]
    fn test_missing_required_headers_rejected() {
        let headers = vec!["Ngày sinh".to_string()];
        assert!(resolve_headers(&headers).is_err());
    }

    #[test]
    fn test_unknown_reference_reported() {
        let (faculty_id, program_id, status_id) = sample_ids();
        let student = sample_student(faculty_id, program_id, status_id);
        let (names, ids) = reference_fixtures(faculty_id, program_id, status_id);

        let mut row = StudentRow::from_student(&student, &names);
        row.faculty = "Vật Lý".to_string();
        let err = row.to_create(&ids).unwrap_err();
        assert!(err.message.contains("Vật Lý"));
    }

    #[test]
    fn test_day_first_dates_accepted() {
        assert_eq!(
            parse_date("20/05/2003"),
            NaiveDate::from_ymd_opt(2003, 5, 20)
        );
        assert_eq!(parse_date("2003-05-20"), NaiveDate::from_ymd_opt(2003, 5, 20));
        assert_eq!(parse_date("garbage"), None);
    }
}
