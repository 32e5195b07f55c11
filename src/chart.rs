use crate::error::ScrapeError;
use crate::models::Tally;
use crate::Result;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

/// Draws one tally as an image at `output`.
pub trait CountsRenderer {
    fn render_counts(&self, counts: &Tally, labels: &ChartLabels, output: &Path) -> Result<()>;
}

/// Vertical bar chart, bars sorted by descending count, written as SVG.
#[derive(Debug, Clone, Copy)]
pub struct BarChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for BarChartRenderer {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

impl CountsRenderer for BarChartRenderer {
    fn render_counts(&self, counts: &Tally, labels: &ChartLabels, output: &Path) -> Result<()> {
        let rows = counts.sorted_desc();
        let names: Vec<String> = rows.iter().map(|(name, _)| name.to_string()).collect();
        let top = rows.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);

        let root = SVGBackend::new(output, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&labels.title, ("sans-serif", 16))
            .margin(10)
            .x_label_area_size(110)
            .y_label_area_size(50)
            .build_cartesian_2d((0..names.len().max(1)).into_segmented(), 0u32..top + 1)
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(labels.x_label.as_str())
            .y_desc(labels.y_label.as_str())
            .x_labels(names.len().max(1))
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => {
                    names.get(*index).cloned().unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.filled())
                    .margin(4)
                    .data(rows.iter().enumerate().map(|(index, (_, count))| (index, *count))),
            )
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
        tracing::debug!(path = %output.display(), bars = rows.len(), "chart written");
        Ok(())
    }
}

fn chart_error<E: Display>(err: E) -> ScrapeError {
    ScrapeError::Chart(err.to_string())
}
