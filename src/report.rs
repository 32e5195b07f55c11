use crate::chart::{BarChartRenderer, ChartLabels, CountsRenderer};
use crate::error::ScrapeError;
use crate::models::{Tally, TallySnapshot};
use crate::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const LANGUAGES_CHART: &str = "languages-counter.svg";
pub const FRAMEWORKS_CHART: &str = "frameworks-counter.svg";
pub const DEFAULT_PLOT_OUTPUT: &str = "./plot-output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Tab separated tables on stdout.
    Text,
    /// Two bar charts under a timestamped directory inside `output_dir`.
    Plots { output_dir: PathBuf },
}

pub struct ReportRequest<'a> {
    pub tallies: &'a TallySnapshot,
    pub search_term: &'a str,
    pub location: &'a str,
}

pub struct ReportRenderer {
    mode: OutputMode,
    charts: Box<dyn CountsRenderer>,
}

impl ReportRenderer {
    pub fn new(mode: OutputMode) -> Self {
        Self::with_charts(mode, Box::new(BarChartRenderer::default()))
    }

    pub fn with_charts(mode: OutputMode, charts: Box<dyn CountsRenderer>) -> Self {
        Self { mode, charts }
    }

    pub fn render(&self, request: &ReportRequest<'_>) -> Result<()> {
        match &self.mode {
            OutputMode::Text => {
                let stdout = io::stdout();
                write_text_report(request.tallies, stdout.lock())
            }
            OutputMode::Plots { output_dir } => {
                let dir = write_plots(request, output_dir, self.charts.as_ref(), Local::now())?;
                println!("Result plots can be found in \"{}\"", dir.display());
                Ok(())
            }
        }
    }
}

#[derive(serde::Serialize)]
struct TallyRow<'a> {
    category: &'a str,
    count: u32,
}

/// Both tallies as tab separated tables, highest counts first.
pub fn write_text_report<W: Write>(tallies: &TallySnapshot, mut out: W) -> Result<()> {
    write_table(&tallies.languages, &mut out)?;
    writeln!(out, "\n==========\n")?;
    write_table(&tallies.frameworks, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_table<W: Write>(tally: &Tally, out: &mut W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(out);

    writer.write_record([tally.label(), "Counter"])?;
    for (category, count) in tally.sorted_desc() {
        writer.serialize(TallyRow { category, count })?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders both charts into `<output_dir>/<timestamp>/` and returns that directory.
pub fn write_plots(
    request: &ReportRequest<'_>,
    output_dir: &Path,
    charts: &dyn CountsRenderer,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let dir = output_dir.join(now.format("%Y-%m-%d-%H-%M-%S").to_string());
    ensure_output_dir(&dir)?;

    let stamp = now.format("%Y-%m-%d %H:%M:%S");
    let suffix = format!("[{stamp}] {} {}", request.location, request.search_term);

    charts.render_counts(
        &request.tallies.languages,
        &ChartLabels {
            title: format!("Summary of found programming languages {suffix}"),
            x_label: "Programming languages".to_string(),
            y_label: "Summary".to_string(),
        },
        &dir.join(LANGUAGES_CHART),
    )?;
    charts.render_counts(
        &request.tallies.frameworks,
        &ChartLabels {
            title: format!("Summary of found programming frameworks {suffix}"),
            x_label: "Programming frameworks".to_string(),
            y_label: "Summary".to_string(),
        },
        &dir.join(FRAMEWORKS_CHART),
    )?;

    Ok(dir)
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ScrapeError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ScrapeError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::OutputDir(e.to_string()))?;
    }
    Ok(())
}
