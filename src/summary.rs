//! Flattened per-run summary of an analysis, suitable for CSV append.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::Analysis;
use crate::grading::Grade;

/// One row summarizing a single analyzed workbook.
#[derive(Debug, Default, Serialize)]
pub struct ResultSummary {
    pub timestamp: DateTime<Utc>,
    pub course: String,
    pub batch: String,
    pub students: usize,

    /// Students with a numeric total.
    pub with_total: usize,
    /// Students whose total cell was blank.
    pub absent: usize,

    // grade counts in display order
    pub grade_o: usize,
    pub grade_a_plus: usize,
    pub grade_a: usize,
    pub grade_b_plus: usize,
    pub grade_b: usize,
    pub grade_c: usize,
    pub grade_p: usize,
    pub grade_f: usize,

    pub mean_total: Option<f64>,
    pub min_total: Option<f64>,
    pub max_total: Option<f64>,
}

impl ResultSummary {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let totals: Vec<f64> = analysis.students.iter().filter_map(|s| s.total).collect();

        let mean_total = if totals.is_empty() {
            None
        } else {
            Some(totals.iter().sum::<f64>() / totals.len() as f64)
        };

        let tally = &analysis.grade_tally;

        ResultSummary {
            timestamp: Utc::now(),
            course: analysis.course.course.clone(),
            batch: analysis.course.batch.clone(),
            students: analysis.students.len(),
            with_total: totals.len(),
            absent: analysis.students.len() - totals.len(),
            grade_o: tally.count(Grade::O),
            grade_a_plus: tally.count(Grade::APlus),
            grade_a: tally.count(Grade::A),
            grade_b_plus: tally.count(Grade::BPlus),
            grade_b: tally.count(Grade::B),
            grade_c: tally.count(Grade::C),
            grade_p: tally.count(Grade::P),
            grade_f: tally.count(Grade::F),
            mean_total,
            min_total: totals.iter().copied().reduce(f64::min),
            max_total: totals.iter().copied().reduce(f64::max),
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of students who passed (anything better than F).
    pub fn pass_pct(&self) -> f64 {
        Self::pct(self.students - self.grade_f, self.students)
    }
}
