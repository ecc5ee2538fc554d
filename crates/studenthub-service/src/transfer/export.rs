//! Spreadsheet serialization of student rows.

use rust_xlsxwriter::Workbook;

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;

use super::row::StudentRow;

/// Serialize rows as CSV with the labeled header line.
pub fn to_csv(rows: &[StudentRow]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(StudentRow::labels())
        .map_err(|e| AppError::with_source(ErrorKind::Serialization, "Failed to write CSV header", e))?;
    for row in rows {
        writer
            .write_record(row.values())
            .map_err(|e| AppError::with_source(ErrorKind::Serialization, "Failed to write CSV row", e))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::storage(format!("Failed to flush CSV: {e}")))
}

/// Serialize rows as a single-sheet XLSX workbook.
pub fn to_xlsx(rows: &[StudentRow]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Students")
        .map_err(|e| AppError::with_source(ErrorKind::Serialization, "Failed to name sheet", e))?;

    for (col, label) in StudentRow::labels().iter().enumerate() {
        sheet
            .write_string(0, col as u16, *label)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Serialization, "Failed to write XLSX header", e)
            })?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.values().iter().enumerate() {
            sheet
                .write_string((r + 1) as u32, c as u16, *value)
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Serialization, "Failed to write XLSX row", e)
                })?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::with_source(ErrorKind::Serialization, "Failed to build XLSX", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> StudentRow {
        StudentRow {
            code: "SV001".to_string(),
            full_name: "Nguyễn Văn An".to_string(),
            date_of_birth: "2003-05-20".to_string(),
            gender: "Nam".to_string(),
            faculty: "Công Nghệ Thông Tin".to_string(),
            program: "Chính quy".to_string(),
            status: "Đang học".to_string(),
            cohort_year: "2021".to_string(),
            email: "an@student.university.edu.vn".to_string(),
            phone: "0912345678".to_string(),
            nationality: "Việt Nam".to_string(),
            ..StudentRow::default()
        }
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let bytes = to_csv(&[sample_row()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Mã số sinh viên"));
        assert!(lines.next().unwrap().starts_with("SV001"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_xlsx_is_nonempty_zip() {
        let bytes = to_xlsx(&[sample_row()]).unwrap();
        // XLSX is a ZIP container; check the magic bytes.
        assert_eq!(&bytes[..2], b"PK");
    }
}
