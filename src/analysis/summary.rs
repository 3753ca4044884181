//! Frame time summary output
//!
//! Produces the human readable group table printed after aggregation and the
//! optional machine readable JSON summary.

use crate::common::table::format_group_table;
use crate::common::FrameTimeAggregates;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing the summary
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Failed to write summary file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

type Result<T> = core::result::Result<T, SummaryError>;

/// Builds the frame time summary text
///
/// # Arguments
/// * `aggregates` - Per-key statistics
/// * `key_column` - Name of the grouping column, used in the title
pub fn format_summary(aggregates: &FrameTimeAggregates, key_column: &str) -> String {
    let groups = aggregates.groups();
    let title = format!("Frame Time by {}", key_column);
    let table = format_group_table(&groups, Some(title.as_str()));

    let total_samples: usize = groups.iter().map(|g| g.samples).sum();
    format!(
        "{}\n\nSummary\n{}\nGroups: {}\nTotal samples: {}",
        table,
        "=".repeat(7),
        groups.len(),
        total_samples
    )
}

/// Writes per-key statistics as a JSON array in key order
pub fn write_json_summary(aggregates: &FrameTimeAggregates, output_path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(writer, &aggregates.groups())?;
    Ok(())
}
