//! Combining datasets and grouping frame times by key

use crate::common::{Dataset, FrameTimeAggregates};
use std::collections::BTreeMap;
use tracing::debug;

/// Concatenates datasets row-wise, keeping input order
///
/// Rows are neither deduplicated nor validated; the output row count is the
/// sum of the input row counts.
pub fn combine(datasets: Vec<Dataset>) -> Dataset {
    let total = datasets.iter().map(Dataset::len).sum();
    let mut rows = Vec::with_capacity(total);
    for dataset in datasets {
        rows.extend(dataset.rows);
    }

    Dataset::new(None, rows)
}

/// Groups rows by key and computes the highest and mean frame time per group
///
/// Keys are returned in ascending order. Groups come from the rows themselves,
/// so none of them is ever empty. The mean is kept as a running average and
/// never exceeds the group's maximum.
pub fn aggregate(dataset: &Dataset) -> FrameTimeAggregates {
    let mut groups: BTreeMap<u32, GroupStats> = BTreeMap::new();
    for row in &dataset.rows {
        groups.entry(row.key).or_default().push(row.frame_time_ms);
    }

    let mut aggregates = FrameTimeAggregates::default();
    for (key, stats) in groups {
        aggregates.highest.insert(key, stats.max);
        aggregates.average.insert(key, stats.mean.min(stats.max));
        aggregates.samples.insert(key, stats.count);
    }

    debug!(
        rows = dataset.len(),
        groups = aggregates.highest.len(),
        "aggregated frame times"
    );
    aggregates
}

/// Running statistics of one group
#[derive(Debug, Clone, Copy)]
struct GroupStats {
    max: f64,
    mean: f64,
    count: usize,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self {
            max: f64::NEG_INFINITY,
            mean: 0.0,
            count: 0,
        }
    }
}

impl GroupStats {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.max = self.max.max(value);
        // Equal values leave the mean untouched, so it cannot drift above them
        self.mean += (value - self.mean) / self.count as f64;
    }
}
