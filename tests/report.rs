use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{Local, TimeZone};
use jd_demand::report::{
    ensure_output_dir, write_plots, write_text_report, ReportRequest, FRAMEWORKS_CHART,
    LANGUAGES_CHART,
};
use jd_demand::{
    BarChartRenderer, ChartLabels, CountsRenderer, KeywordDictionary, OutputMode, ReportRenderer,
    ScrapeError, Tally, TallySnapshot,
};
use pretty_assertions::assert_eq;

fn tally(label: &str, names: &[&str], hits: &[&str]) -> Tally {
    let dictionary = KeywordDictionary::new(
        label,
        names.iter().map(|name| (*name, Vec::<&str>::new())),
    );
    let mut tally = Tally::zeroed(&dictionary);
    for hit in hits {
        tally.increment(hit);
    }
    tally
}

fn snapshot() -> TallySnapshot {
    TallySnapshot {
        languages: tally(
            "Language",
            &["Go", "Rust", "Zig", "C++"],
            &["Rust", "Go", "Rust", "C++"],
        ),
        frameworks: tally("Framework", &["Axum", "Actix"], &["Axum"]),
    }
}

#[test]
fn text_report_lists_highest_counts_first() {
    let mut out = Vec::new();

    write_text_report(&snapshot(), &mut out).unwrap();

    let expected = "Language\tCounter\n\
                    Rust\t2\n\
                    C++\t1\n\
                    Go\t1\n\
                    Zig\t0\n\
                    \n==========\n\n\
                    Framework\tCounter\n\
                    Axum\t1\n\
                    Actix\t0\n";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[derive(Debug, Clone, PartialEq)]
struct RenderCall {
    labels: ChartLabels,
    output: PathBuf,
    rows: Vec<(String, u32)>,
}

#[derive(Clone, Default)]
struct RecordingCharts {
    calls: Rc<RefCell<Vec<RenderCall>>>,
}

impl CountsRenderer for RecordingCharts {
    fn render_counts(&self, counts: &Tally, labels: &ChartLabels, output: &Path) -> jd_demand::Result<()> {
        self.calls.borrow_mut().push(RenderCall {
            labels: labels.clone(),
            output: output.to_path_buf(),
            rows: counts
                .sorted_desc()
                .into_iter()
                .map(|(name, count)| (name.to_string(), count))
                .collect(),
        });
        Ok(())
    }
}

#[test]
fn plots_go_into_timestamped_directory() {
    let root = tempfile::tempdir().unwrap();
    let charts = RecordingCharts::default();
    let tallies = snapshot();
    let request = ReportRequest {
        tallies: &tallies,
        search_term: "backend",
        location: "Berlin",
    };
    let now = Local.with_ymd_and_hms(2026, 10, 19, 8, 5, 3).unwrap();

    let dir = write_plots(&request, root.path(), &charts, now).unwrap();

    assert_eq!(dir, root.path().join("2026-10-19-08-05-03"));
    assert!(dir.is_dir());

    let calls = charts.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].output, dir.join(LANGUAGES_CHART));
    assert_eq!(
        calls[0].labels,
        ChartLabels {
            title: "Summary of found programming languages [2026-10-19 08:05:03] Berlin backend"
                .to_string(),
            x_label: "Programming languages".to_string(),
            y_label: "Summary".to_string(),
        }
    );
    assert_eq!(calls[0].rows[0], ("Rust".to_string(), 2));
    assert_eq!(calls[1].output, dir.join(FRAMEWORKS_CHART));
    assert_eq!(calls[1].labels.x_label, "Programming frameworks");
    assert_eq!(calls[1].rows.len(), 2);
}

#[test]
fn renderer_writes_plots_with_injected_charts() {
    let root = tempfile::tempdir().unwrap();
    let charts = RecordingCharts::default();
    let renderer = ReportRenderer::with_charts(
        OutputMode::Plots {
            output_dir: root.path().join("nested").join("plots"),
        },
        Box::new(charts.clone()),
    );
    let tallies = snapshot();

    renderer
        .render(&ReportRequest {
            tallies: &tallies,
            search_term: "backend",
            location: "Berlin",
        })
        .unwrap();

    assert_eq!(charts.calls.borrow().len(), 2);
    let created: Vec<_> = fs::read_dir(root.path().join("nested").join("plots"))
        .unwrap()
        .collect();
    assert_eq!(created.len(), 1);
}

#[test]
fn bar_chart_is_written_as_svg() {
    let root = tempfile::tempdir().unwrap();
    let output = root.path().join(LANGUAGES_CHART);
    let tallies = snapshot();

    BarChartRenderer::default()
        .render_counts(
            &tallies.languages,
            &ChartLabels {
                title: "Summary".to_string(),
                x_label: "Programming languages".to_string(),
                y_label: "Summary".to_string(),
            },
            &output,
        )
        .unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"), "{svg}");
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let root = tempfile::tempdir().unwrap();
    let file = root.path().join("taken");
    fs::write(&file, "x").unwrap();

    let err = ensure_output_dir(&file).unwrap_err();

    assert!(matches!(err, ScrapeError::OutputDir(_)), "{err:?}");
}

#[test]
fn output_dir_is_created_when_missing() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("a").join("b");

    ensure_output_dir(&dir).unwrap();

    assert!(dir.is_dir());
}
