//! Two-panel result chart: marks histogram and grade distribution.
//!
//! Renders a PNG with (a) totals binned into 10-mark intervals and (b)
//! grade counts in display order, titled from the course info. The only
//! algorithmic content is the shared y-axis rule in [`axis_limit`].

use anyhow::Result;
use plotters::prelude::*;
use tracing::info;

use crate::analysis::Analysis;
use crate::grading::Grade;
use crate::histogram::{BIN_COUNT, HistogramBin};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 1000;

/// Tick spacing on both y axes.
const Y_MAJOR: u32 = 5;

const MARKS_BAR: RGBColor = RGBColor(31, 119, 180);
const GRADE_BAR: RGBColor = RGBColor(255, 127, 14);

/// Upper y-axis limit: the max bin count rounded up to the next multiple
/// of 5, never below 5 so an empty chart still has a visible axis.
pub fn axis_limit(max_count: usize) -> u32 {
    let limit = (max_count as u32).div_ceil(Y_MAJOR) * Y_MAJOR;
    limit.max(Y_MAJOR)
}

/// Renders the two-panel chart to `path`.
#[tracing::instrument(skip(analysis), fields(course = %analysis.course.course, path))]
pub fn render_chart(analysis: &Analysis, path: &str) -> Result<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (line1, line2) = analysis.course.title();
    let root = root
        .titled(&line1, ("sans-serif", 24))?
        .titled(&line2, ("sans-serif", 16))?;

    let panels = root.split_evenly((2, 1));
    draw_marks_panel(&panels[0], analysis)?;
    draw_grade_panel(&panels[1], analysis)?;

    root.present()?;
    info!(path, "Chart written");
    Ok(())
}

fn draw_marks_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    analysis: &Analysis,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let ymax = axis_limit(analysis.histogram.max_count());
    let bins = HistogramBin::all();

    let mut chart = ChartBuilder::on(area)
        .margin(15)
        .caption(
            "(a) Marks Distribution (10-mark intervals)",
            ("sans-serif", 18),
        )
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..BIN_COUNT as u32).into_segmented(), 0u32..ymax)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(BIN_COUNT)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) if (*i as usize) < BIN_COUNT => {
                bins[*i as usize].label()
            }
            _ => String::new(),
        })
        .y_labels((ymax / Y_MAJOR + 1) as usize)
        .x_desc("Marks Secured")
        .y_desc("Number of Students")
        .draw()?;

    chart.draw_series(
        plotters::series::Histogram::vertical(&chart)
            .style(MARKS_BAR.filled())
            .margin(1)
            .data(
                analysis
                    .histogram
                    .entries()
                    .enumerate()
                    .map(|(i, (_, count))| (i as u32, count as u32)),
            ),
    )?;

    Ok(())
}

fn draw_grade_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    analysis: &Analysis,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let ymax = axis_limit(analysis.grade_tally.max_count());

    let mut chart = ChartBuilder::on(area)
        .margin(15)
        .caption("(b) Grade Distribution", ("sans-serif", 18))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..Grade::ALL.len() as u32).into_segmented(), 0u32..ymax)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(Grade::ALL.len())
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) if (*i as usize) < Grade::ALL.len() => {
                Grade::ALL[*i as usize].label().to_string()
            }
            _ => String::new(),
        })
        .y_labels((ymax / Y_MAJOR + 1) as usize)
        .x_desc("Grade")
        .y_desc("Number of Students")
        .draw()?;

    chart.draw_series(
        plotters::series::Histogram::vertical(&chart)
            .style(GRADE_BAR.filled())
            .margin(4)
            .data(
                analysis
                    .grade_tally
                    .entries()
                    .enumerate()
                    .map(|(i, (_, count))| (i as u32, count as u32)),
            ),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CourseInfo, StudentRecord};
    use std::env;
    use std::fs;

    #[test]
    fn test_axis_limit_rounds_up_to_multiple_of_five() {
        assert_eq!(axis_limit(0), 5);
        assert_eq!(axis_limit(1), 5);
        assert_eq!(axis_limit(5), 5);
        assert_eq!(axis_limit(6), 10);
        assert_eq!(axis_limit(23), 25);
        assert_eq!(axis_limit(25), 25);
    }

    #[test]
    fn test_render_writes_png() {
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
                total: Some(42.0),
            },
        ];
        let analysis = Analysis::from_parts(course, students);

        let path = format!(
            "{}/lab_result_analyzer_test_chart.png",
            env::temp_dir().display()
        );
        let _ = fs::remove_file(&path);

        // Text rendering needs system fonts, which headless test
        // environments do not always have.
        match render_chart(&analysis, &path) {
            Ok(()) => {
                let metadata = fs::metadata(&path).unwrap();
                assert!(metadata.len() > 0);
                fs::remove_file(&path).unwrap();
            }
            Err(e) => eprintln!("chart rendering unavailable here: {e}"),
        }
    }
}
