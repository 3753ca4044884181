//! ASCII table formatting for per-group frame time statistics
//!
//! This module provides:
//! - [`GroupEntry`] type for representing one key group with preformatted statistics
//! - ASCII table formatting using the [`tabled`] crate

use super::data_structures::GroupSummary;
use tabled::{Table, Tabled};

/// Represents a single key group row of the summary table
#[derive(Debug, Clone, Tabled)]
pub struct GroupEntry {
    /// Group key (cube or sphere count)
    #[tabled(rename = "Key")]
    pub key: u32,
    /// Number of samples in this group
    #[tabled(rename = "Samples")]
    pub samples: usize,
    /// Highest frame time, formatted in milliseconds
    #[tabled(rename = "Highest (ms)")]
    pub highest: String,
    /// Average frame time, formatted in milliseconds
    #[tabled(rename = "Average (ms)")]
    pub average: String,
}

impl From<&GroupSummary> for GroupEntry {
    fn from(group: &GroupSummary) -> Self {
        Self {
            key: group.key,
            samples: group.samples,
            highest: format!("{:.3}", group.highest),
            average: format!("{:.3}", group.average),
        }
    }
}

/// Formats group summaries as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `groups` - Per-key statistics in key order
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_group_table(groups: &[GroupSummary], title: Option<&str>) -> String {
    if groups.is_empty() {
        return "No data available for grouping".to_string();
    }

    let entries: Vec<GroupEntry> = groups.iter().map(GroupEntry::from).collect();
    let table = Table::new(entries).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
