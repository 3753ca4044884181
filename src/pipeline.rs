//! The load → combine → aggregate → render pipeline

use crate::analysis::{aggregate, combine, write_json_summary};
use crate::common::plots::{BarChart, ChartRenderer};
use crate::common::FrameTimeAggregates;
use crate::config::PipelineConfig;
use crate::parsing::load_datasets;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// What a pipeline run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Rows per input file, in input order
    pub file_rows: Vec<usize>,
    /// Rows in the combined dataset
    pub combined_rows: usize,
    pub aggregates: FrameTimeAggregates,
    /// The chart handed to the renderer
    pub chart: BarChart,
}

/// Runs the whole pipeline once
///
/// Loads every input, combines and aggregates the rows, optionally writes the
/// JSON summary, then draws the chart with `renderer`. The first error aborts
/// the run.
pub fn run<R: ChartRenderer>(config: &PipelineConfig, renderer: &R) -> Result<PipelineReport> {
    config.validate()?;

    let progress = if config.show_progress {
        loading_progress_bar()
    } else {
        ProgressBar::hidden()
    };

    let datasets = load_datasets(&config.inputs, &config.columns, &progress)?;
    let file_rows: Vec<usize> = datasets.iter().map(|d| d.len()).collect();

    let combined = combine(datasets);
    info!(
        files = file_rows.len(),
        rows = combined.len(),
        "combined benchmark files"
    );

    let aggregates = aggregate(&combined);
    if let Some(summary_path) = &config.summary {
        write_json_summary(&aggregates, summary_path)?;
        info!(path = %summary_path.display(), "wrote summary");
    }

    let chart = BarChart::from_aggregates(
        &aggregates,
        &config.labels,
        &config.tick_scale,
        config.bar_width,
    );
    renderer.render(&chart)?;

    Ok(PipelineReport {
        file_rows,
        combined_rows: combined.len(),
        aggregates,
        chart,
    })
}

fn loading_progress_bar() -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    ProgressBar::new(0).with_style(style)
}
