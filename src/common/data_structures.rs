use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single benchmark sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Independent variable (number of cubes, spheres, ...)
    pub key: u32,
    /// Measured frame time in milliseconds
    pub frame_time_ms: f64,
}

impl Measurement {
    pub fn new(key: u32, frame_time_ms: f64) -> Self {
        Self { key, frame_time_ms }
    }
}

/// Ordered rows loaded from one or more CSV files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// File the rows were loaded from, `None` for combined datasets
    pub source: Option<PathBuf>,
    /// Rows in file order
    pub rows: Vec<Measurement>,
}

impl Dataset {
    pub fn new(source: Option<PathBuf>, rows: Vec<Measurement>) -> Self {
        Self { source, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-key frame time statistics
///
/// All three maps always share the same key set; they are only ever built
/// together by [`crate::analysis::aggregate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTimeAggregates {
    /// Highest frame time per key
    pub highest: BTreeMap<u32, f64>,
    /// Mean frame time per key
    pub average: BTreeMap<u32, f64>,
    /// Number of samples per key
    pub samples: BTreeMap<u32, usize>,
}

impl FrameTimeAggregates {
    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.highest.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.highest.is_empty()
    }

    /// Largest value of the `highest` series, `None` when there are no groups
    pub fn highest_max(&self) -> Option<f64> {
        self.highest.values().copied().reduce(f64::max)
    }

    /// Flattens the maps into one summary per key, in key order
    pub fn groups(&self) -> Vec<GroupSummary> {
        self.highest
            .iter()
            .map(|(&key, &highest)| GroupSummary {
                key,
                samples: self.samples.get(&key).copied().unwrap_or_default(),
                highest,
                average: self.average.get(&key).copied().unwrap_or(f64::NAN),
            })
            .collect()
    }
}

/// Statistics of a single key group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: u32,
    pub samples: usize,
    pub highest: f64,
    pub average: f64,
}
