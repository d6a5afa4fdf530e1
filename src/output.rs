//! Output formatting and persistence for analysis results.
//!
//! Supports pretty-printing, JSON serialization, table display, and CSV
//! writing/appending.

use anyhow::Result;
use tracing::{debug, info};

use crate::analysis::Analysis;
use crate::histogram::HistogramTally;
use crate::summary::ResultSummary;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs an analysis using Rust's debug pretty-print format.
pub fn print_pretty(analysis: &Analysis) {
    debug!("{:#?}", analysis);
}

/// Prints the whole analysis bundle as pretty JSON.
pub fn print_json(analysis: &Analysis) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(analysis)?);
    Ok(())
}

/// Prints the histogram table and the per-student marks & grades table.
pub fn print_tables(analysis: &Analysis) {
    println!("Histogram Table (10-mark intervals)");
    println!("{:<12} {}", "Marks Range", "Number of Students");
    for (bin, count) in analysis.histogram.entries() {
        println!("{:<12} {}", bin.label(), count);
    }

    println!();
    println!("Grade Distribution");
    println!("{:<6} {}", "Grade", "Number of Students");
    for (grade, count) in analysis.grade_tally.entries() {
        println!("{:<6} {}", grade.label(), count);
    }

    println!();
    println!("Student Marks & Grades");
    println!("{:<20} {:>8}  {}", "Student", "Total", "Grade");
    for student in &analysis.students {
        match student.total {
            Some(t) => println!("{:<20} {:>8.2}  {}", student.id, t, student.grade),
            None => println!("{:<20} {:>8}  {}", student.id, "-", student.grade),
        }
    }
}

/// Writes the histogram table as a two-column CSV file, overwriting any
/// previous contents.
pub fn write_histogram_csv(path: &str, histogram: &HistogramTally) -> Result<()> {
    debug!(path, "Writing histogram CSV");

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(["Marks Range", "Number of Students"])?;
    for (bin, count) in histogram.entries() {
        writer.write_record([bin.label(), count.to_string()])?;
    }
    writer.flush()?;

    info!(path, "Histogram table written");
    Ok(())
}

/// Appends a [`ResultSummary`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_summary(path: &str, summary: &ResultSummary) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending summary record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(summary)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::bin_histogram;
    use crate::parser::{CourseInfo, StudentRecord};
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_analysis() -> Analysis {
        let course = CourseInfo {
            course: "PH101".to_string(),
            academic_year: "2025-26".to_string(),
            program: "B.Tech".to_string(),
            batch: "2024".to_string(),
        };
        let students = vec![
            StudentRecord {
                id: "Asha".to_string(),
                total: Some(85.0),
            },
            StudentRecord {
                id: "Ben".to_string(),
                total: None,
            },
        ];
        Analysis::from_parts(course, students)
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_analysis());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_analysis()).unwrap();
    }

    #[test]
    fn test_print_tables_does_not_panic() {
        print_tables(&sample_analysis());
    }

    #[test]
    fn test_write_histogram_csv() {
        let path = temp_path("lab_result_analyzer_test_histogram.csv");
        let _ = fs::remove_file(&path);

        let histogram = bin_histogram([Some(85.0), Some(12.0)]);
        write_histogram_csv(&path, &histogram).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // 1 header + 10 bins
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Marks Range,Number of Students");
        assert_eq!(lines[2], "10-20,1");
        assert_eq!(lines[9], "80-90,1");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_summary_creates_file() {
        let path = temp_path("lab_result_analyzer_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let summary = ResultSummary::from_analysis(&sample_analysis());
        append_summary(&path, &summary).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_summary_writes_header_once() {
        let path = temp_path("lab_result_analyzer_test_header.csv");
        let _ = fs::remove_file(&path);

        let summary = ResultSummary::from_analysis(&sample_analysis());
        append_summary(&path, &summary).unwrap();
        append_summary(&path, &summary).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.contains("timestamp")).count();
        assert_eq!(header_count, 1);

        // 1 header + 2 data rows
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
