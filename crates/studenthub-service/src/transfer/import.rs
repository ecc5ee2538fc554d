//! Spreadsheet parsing into student rows.
//!
//! Files are read fully in memory; parsing is single-shot with no
//! streaming. Header rows are matched by label or fallback key before any
//! data row is read.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use studenthub_core::error::{AppError, ErrorKind};
use studenthub_core::result::AppResult;

use super::row::{self, StudentRow};

/// Parse CSV bytes into student rows.
pub fn parse_csv(data: &[u8]) -> AppResult<Vec<StudentRow>> {
    let mut reader = csv::Reader::from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Failed to read CSV header", e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let positions = row::resolve_headers(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            AppError::with_source(ErrorKind::Validation, "Failed to read CSV row", e)
        })?;
        let cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
        rows.push(StudentRow::from_cells(&cells, &positions));
    }
    Ok(rows)
}

/// Parse XLSX bytes into student rows, reading the first sheet.
pub fn parse_xlsx(data: &[u8]) -> AppResult<Vec<StudentRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Failed to open workbook", e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::validation("Workbook has no sheets"))?
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Failed to read sheet", e))?;

    let mut row_iter = range.rows();
    let headers: Vec<String> = row_iter
        .next()
        .ok_or_else(|| AppError::validation("Sheet has no header row"))?
        .iter()
        .map(cell_to_string)
        .collect();
    let positions = row::resolve_headers(&headers)?;

    let mut rows = Vec::new();
    for cells in row_iter {
        let cells: Vec<String> = cells.iter().map(cell_to_string).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push(StudentRow::from_cells(&cells, &positions));
    }
    Ok(rows)
}

/// Render a spreadsheet cell as the trimmed display string our row
/// mapping expects. Whole floats print without a fraction so year cells
/// survive Excel's number typing.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::export;

    fn sample_row() -> StudentRow {
        StudentRow {
            code: "SV001".to_string(),
            full_name: "Nguyễn Văn An".to_string(),
            date_of_birth: "2003-05-20".to_string(),
            gender: "Nam".to_string(),
            faculty: "CNTT".to_string(),
            program: "CQ".to_string(),
            status: "DH".to_string(),
            cohort_year: "2021".to_string(),
            email: "an@student.university.edu.vn".to_string(),
            phone: "0912345678".to_string(),
            nationality: "Việt Nam".to_string(),
            ..StudentRow::default()
        }
    }

    #[test]
    fn test_csv_round_trip() {
        let bytes = export::to_csv(&[sample_row()]).unwrap();
        let parsed = parse_csv(&bytes).unwrap();
        assert_eq!(parsed, vec![sample_row()]);
    }

    #[test]
    fn test_xlsx_round_trip() {
        let bytes = export::to_xlsx(&[sample_row()]).unwrap();
        let parsed = parse_xlsx(&bytes).unwrap();
        assert_eq!(parsed, vec![sample_row()]);
    }

    #[test]
    fn test_snake_case_headers_accepted() {
        let csv = "student_code,full_name,gender\nSV002,Trần Thị Bình,Nữ\n";
        let parsed = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].code, "SV002");
        assert_eq!(parsed[0].full_name, "Trần Thị Bình");
        assert_eq!(parsed[0].gender, "Nữ");
        assert_eq!(parsed[0].email, "");
    }

    #[test]
    fn test_missing_required_columns_rejected() {
        let csv = "gender,email\nNam,a@b.vn\n";
        assert!(parse_csv(csv.as_bytes()).is_err());
    }
}
