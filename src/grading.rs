//! Letter-grade assignment and tallying.

use serde::Serialize;
use std::fmt;

/// Letter grade derived from a student's total mark.
///
/// | Total       | Grade |
/// |-------------|-------|
/// | missing     | F     |
/// | >= 80       | O     |
/// | >= 70       | A+    |
/// | >= 60       | A     |
/// | >= 55       | B+    |
/// | >= 50       | B     |
/// | >= 45       | C     |
/// | >= 40       | P     |
/// | < 40        | F     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    O,
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    P,
    F,
}

impl Grade {
    /// Fixed display order used by every tally, table, and chart.
    pub const ALL: [Grade; 8] = [
        Grade::O,
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::C,
        Grade::P,
        Grade::F,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Grade::O => "O",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::P => "P",
            Grade::F => "F",
        }
    }

    fn index(&self) -> usize {
        match self {
            Grade::O => 0,
            Grade::APlus => 1,
            Grade::A => 2,
            Grade::BPlus => 3,
            Grade::B => 4,
            Grade::C => 5,
            Grade::P => 6,
            Grade::F => 7,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Converts a total mark (out of 100) into a letter grade.
///
/// A missing mark is failing. Out-of-range values are not rejected: a
/// negative total falls through to F and anything above 100 still
/// satisfies the top threshold. NaN fails every comparison and grades F.
pub fn assign_grade(total: Option<f64>) -> Grade {
    match total {
        None => Grade::F,
        Some(t) if t >= 80.0 => Grade::O,
        Some(t) if t >= 70.0 => Grade::APlus,
        Some(t) if t >= 60.0 => Grade::A,
        Some(t) if t >= 55.0 => Grade::BPlus,
        Some(t) if t >= 50.0 => Grade::B,
        Some(t) if t >= 45.0 => Grade::C,
        Some(t) if t >= 40.0 => Grade::P,
        Some(_) => Grade::F,
    }
}

/// Grade counts in the fixed display order, zero-filled.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GradeTally {
    counts: [usize; 8],
}

impl GradeTally {
    pub fn count(&self, grade: Grade) -> usize {
        self.counts[grade.index()]
    }

    /// All 8 (grade, count) pairs in `Grade::ALL` order, including zeros.
    pub fn entries(&self) -> impl Iterator<Item = (Grade, usize)> + '_ {
        Grade::ALL.iter().map(|g| (*g, self.counts[g.index()]))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Largest single count, used for chart axis scaling.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl Serialize for GradeTally {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(8))?;
        for (grade, count) in self.entries() {
            map.serialize_entry(grade.label(), &count)?;
        }
        map.end()
    }
}

/// Counts grade occurrences into the fixed display order.
pub fn tally_grades(grades: impl IntoIterator<Item = Grade>) -> GradeTally {
    let mut tally = GradeTally::default();
    for grade in grades {
        tally.counts[grade.index()] += 1;
    }
    tally
}
