//! Error taxonomy for workbook validation.
//!
//! Malformed input surfaces as one of these named errors instead of a
//! panic; the CLI reports the message and exits. No retries, this is a
//! single-shot batch computation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("workbook has no '{0}' sheet")]
    MissingSheet(String),

    #[error("sheet '{sheet}' has no '{column}' column")]
    MissingColumn { sheet: String, column: String },

    #[error("sheet 'Course_Info' is missing the '{0}' field")]
    MissingField(String),

    #[error("invalid value '{value}' in sheet '{sheet}' row {row}: expected a number")]
    InvalidValue {
        sheet: String,
        row: usize,
        value: String,
    },

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),
}
