//! Workbook parser for lab result spreadsheets.
//!
//! Expects an xlsx workbook with two sheets: `Course_Info` (Field/Value
//! pairs describing the course) and `Marks` (one row per student with at
//! least a `Total` column). Sheet and column presence is validated up
//! front so a malformed file fails with a named error, not a crash.

use calamine::{Data, Range, Reader, Xlsx};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

use crate::error::AnalysisError;

pub const COURSE_INFO_SHEET: &str = "Course_Info";
pub const MARKS_SHEET: &str = "Marks";

const FIELD_COLUMN: &str = "Field";
const VALUE_COLUMN: &str = "Value";
const TOTAL_COLUMN: &str = "Total";

const COURSE_FIELD: &str = "Course Code and Name";
const YEAR_FIELD: &str = "Academic Year";
const PROGRAM_FIELD: &str = "Program";
const BATCH_FIELD: &str = "Batch";

/// Course metadata used only for labeling outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseInfo {
    pub course: String,
    pub academic_year: String,
    pub program: String,
    pub batch: String,
}

impl CourseInfo {
    /// Two-line figure title assembled from the course fields.
    pub fn title(&self) -> (String, String) {
        (
            format!("Result Analysis - {}", self.course),
            format!(
                "Academic Year: {} | Program: {} | Batch: {}",
                self.academic_year, self.program, self.batch
            ),
        )
    }
}

/// One row of the `Marks` sheet. A blank `Total` cell is kept as `None`
/// so grading can count the student as failing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub id: String,
    pub total: Option<f64>,
}

/// Decodes an xlsx workbook from raw bytes into course info and student
/// records.
///
/// # Errors
///
/// Returns [`AnalysisError::Workbook`] if the bytes are not a valid xlsx
/// archive, and the taxonomy errors from [`parse_course_info`] and
/// [`parse_marks`] for structural problems inside it.
pub fn parse_workbook(bytes: &[u8]) -> Result<(CourseInfo, Vec<StudentRecord>), AnalysisError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let course_range = sheet_range(&mut workbook, COURSE_INFO_SHEET)?;
    let marks_range = sheet_range(&mut workbook, MARKS_SHEET)?;

    let course = parse_course_info(&course_range)?;
    let students = parse_marks(&marks_range)?;

    debug!(
        course = %course.course,
        students = students.len(),
        "Workbook parsed"
    );

    Ok((course, students))
}

fn sheet_range(
    workbook: &mut Xlsx<Cursor<&[u8]>>,
    name: &str,
) -> Result<Range<Data>, AnalysisError> {
    if !workbook.sheet_names().iter().any(|n| n == name) {
        return Err(AnalysisError::MissingSheet(name.to_string()));
    }
    Ok(workbook.worksheet_range(name)?)
}

/// Reads the Field/Value pairs of the `Course_Info` sheet into a
/// [`CourseInfo`], requiring all four known fields to be present.
pub fn parse_course_info(range: &Range<Data>) -> Result<CourseInfo, AnalysisError> {
    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);

    let field_col = find_column(header, COURSE_INFO_SHEET, FIELD_COLUMN)?;
    let value_col = find_column(header, COURSE_INFO_SHEET, VALUE_COLUMN)?;

    let mut fields: HashMap<String, String> = HashMap::new();
    for row in rows {
        let field = cell_text(row.get(field_col));
        if field.is_empty() {
            continue;
        }
        fields.insert(field, cell_text(row.get(value_col)));
    }

    let mut required = |name: &str| -> Result<String, AnalysisError> {
        fields
            .remove(name)
            .ok_or_else(|| AnalysisError::MissingField(name.to_string()))
    };

    Ok(CourseInfo {
        course: required(COURSE_FIELD)?,
        academic_year: required(YEAR_FIELD)?,
        program: required(PROGRAM_FIELD)?,
        batch: required(BATCH_FIELD)?,
    })
}

/// Reads the `Marks` sheet into student records.
///
/// The first column is treated as the student identifier, falling back to
/// the sheet row number when blank. Fully empty rows (trailing padding in
/// hand-edited sheets) are skipped.
pub fn parse_marks(range: &Range<Data>) -> Result<Vec<StudentRecord>, AnalysisError> {
    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);

    let total_col = find_column(header, MARKS_SHEET, TOTAL_COLUMN)?;

    let mut students = Vec::new();
    for (i, row) in rows.enumerate() {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }

        // Sheet row number: header is row 1.
        let sheet_row = i + 2;

        let id = match cell_text(row.first()) {
            s if s.is_empty() => sheet_row.to_string(),
            s => s,
        };

        let total = parse_total(row.get(total_col), sheet_row)?;
        students.push(StudentRecord { id, total });
    }

    Ok(students)
}

fn parse_total(cell: Option<&Data>, sheet_row: usize) -> Result<Option<f64>, AnalysisError> {
    let invalid = |value: String| AnalysisError::InvalidValue {
        sheet: MARKS_SHEET.to_string(),
        row: sheet_row,
        value,
    };

    match cell {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::Float(f)) => Ok(Some(*f)),
        Some(Data::Int(i)) => Ok(Some(*i as f64)),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| invalid(trimmed.to_string()))
            }
        }
        Some(other) => Err(invalid(other.to_string())),
    }
}

fn find_column(header: &[Data], sheet: &str, column: &str) -> Result<usize, AnalysisError> {
    header
        .iter()
        .position(|c| cell_text(Some(c)) == column)
        .ok_or_else(|| AnalysisError::MissingColumn {
            sheet: sheet.to_string(),
            column: column.to_string(),
        })
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}
