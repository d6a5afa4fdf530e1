use lab_result_analyzer::analysis::Analysis;
use lab_result_analyzer::grading::Grade;
use lab_result_analyzer::summary::ResultSummary;

#[test]
fn test_full_pipeline() {
    let bytes = include_bytes!("fixtures/sample_lab_results.xlsx");
    let analysis = Analysis::from_workbook(bytes).expect("Failed to analyze workbook");

    assert_eq!(analysis.course.course, "PH101 Physics Lab");
    assert_eq!(analysis.course.academic_year, "2025-26");
    assert_eq!(analysis.course.program, "B.Tech");
    assert_eq!(analysis.course.batch, "2024");

    // Totals in the fixture: 85, 72, 58, 42, missing, 100.
    assert_eq!(analysis.students.len(), 6);
    let grades: Vec<_> = analysis.students.iter().map(|s| s.grade).collect();
    assert_eq!(
        grades,
        [
            Grade::O,
            Grade::APlus,
            Grade::BPlus,
            Grade::P,
            Grade::F,
            Grade::O
        ]
    );

    assert_eq!(analysis.grade_tally.total(), 6);
    assert_eq!(analysis.grade_tally.count(Grade::O), 2);
    assert_eq!(analysis.grade_tally.count(Grade::F), 1);

    // The missing total is graded F but excluded from the histogram;
    // the perfect score of 100 lands in the closed top bin.
    assert_eq!(analysis.histogram.total(), 5);
    let counts: Vec<_> = analysis.histogram.entries().map(|(_, c)| c).collect();
    assert_eq!(counts, [0, 0, 0, 0, 1, 1, 0, 1, 1, 1]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let bytes = include_bytes!("fixtures/sample_lab_results.xlsx");

    let first = Analysis::from_workbook(bytes).expect("Failed to analyze workbook");
    let second = Analysis::from_workbook(bytes).expect("Failed to analyze workbook");

    assert_eq!(first, second);
}

#[test]
fn test_summary_from_fixture() {
    let bytes = include_bytes!("fixtures/sample_lab_results.xlsx");
    let analysis = Analysis::from_workbook(bytes).expect("Failed to analyze workbook");

    let summary = ResultSummary::from_analysis(&analysis);
    assert_eq!(summary.students, 6);
    assert_eq!(summary.with_total, 5);
    assert_eq!(summary.absent, 1);
    assert_eq!(summary.grade_o, 2);
    assert_eq!(summary.min_total, Some(42.0));
    assert_eq!(summary.max_total, Some(100.0));
}
