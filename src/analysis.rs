//! The full result-analysis pipeline: workbook bytes in, tallies out.
//!
//! Every invocation recomputes everything from scratch. There is no
//! caching and no shared state, so analyzing the same bytes twice yields
//! identical results.

use serde::Serialize;
use tracing::info;

use crate::error::AnalysisError;
use crate::grading::{Grade, GradeTally, assign_grade, tally_grades};
use crate::histogram::{HistogramTally, bin_histogram};
use crate::parser::{CourseInfo, StudentRecord, parse_workbook};

/// A student record with its derived grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedStudent {
    pub id: String,
    pub total: Option<f64>,
    pub grade: Grade,
}

/// Everything derived from one workbook: graded students, the grade
/// distribution, and the marks histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub course: CourseInfo,
    pub students: Vec<GradedStudent>,
    pub grade_tally: GradeTally,
    pub histogram: HistogramTally,
}

impl Analysis {
    /// Runs the whole pipeline on raw xlsx bytes.
    #[tracing::instrument(skip(bytes), fields(bytes = bytes.len()))]
    pub fn from_workbook(bytes: &[u8]) -> Result<Self, AnalysisError> {
        let (course, students) = parse_workbook(bytes)?;
        let analysis = Self::from_parts(course, students);

        info!(
            course = %analysis.course.course,
            students = analysis.students.len(),
            graded = analysis.grade_tally.total(),
            "Analysis complete"
        );

        Ok(analysis)
    }

    /// Grades, tallies, and bins already-parsed records.
    ///
    /// Grading counts a missing total as F; the histogram drops it. Both
    /// tallies always carry their full key set in fixed order.
    pub fn from_parts(course: CourseInfo, students: Vec<StudentRecord>) -> Self {
        let students: Vec<GradedStudent> = students
            .into_iter()
            .map(|s| GradedStudent {
                grade: assign_grade(s.total),
                id: s.id,
                total: s.total,
            })
            .collect();

        let grade_tally = tally_grades(students.iter().map(|s| s.grade));
        let histogram = bin_histogram(students.iter().map(|s| s.total));

        Analysis {
            course,
            students,
            grade_tally,
            histogram,
        }
    }
}
