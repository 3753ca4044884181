//! Pipeline configuration
//!
//! A [`Preset`] bundles the grouping column, default inputs and chart labels of one
//! benchmark scene. [`PipelineConfig::for_preset`] expands it into a full
//! configuration which the command line may then override field by field.

use crate::analysis::TickScale;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Column holding the measured frame time in all benchmark files
pub const FRAME_TIME_COLUMN: &str = "FrameTime_ms";

/// Default width of a bar, in key units
pub const DEFAULT_BAR_WIDTH: f64 = 4.0;

/// Errors that can occur while building the configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown preset '{0}', expected 'cubes' or 'spheres'")]
    UnknownPreset(String),

    #[error("Bar width must be a positive number, got {0}")]
    InvalidBarWidth(f64),

    #[error("No input files given")]
    NoInputs,
}

/// Benchmark scene whose results are being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Cubes,
    Spheres,
}

impl Preset {
    /// Name of the grouping column in the benchmark output
    pub fn key_column(self) -> &'static str {
        match self {
            Preset::Cubes => "Cubes",
            Preset::Spheres => "Spheres",
        }
    }

    /// Benchmark files written by the renderer for this scene
    pub fn default_inputs(self) -> Vec<PathBuf> {
        let prefix = match self {
            Preset::Cubes => "performance_metrics",
            Preset::Spheres => "sphere_performance_metrics",
        };

        [1, 5, 10]
            .iter()
            .map(|run| PathBuf::from(format!("./{}_{}.csv", prefix, run)))
            .collect()
    }

    pub fn labels(self) -> ChartLabels {
        let (noun, plural) = match self {
            Preset::Cubes => ("cubes", "Cubes"),
            Preset::Spheres => ("spheres", "Spheres"),
        };

        ChartLabels {
            title: format!(
                "Highest and Average FrameTime (in ms) for different Number of {}",
                plural
            ),
            x_label: format!("Number of {}", noun),
            y_label: "FrameTime (in ms)".to_string(),
        }
    }

    pub fn default_output(self) -> PathBuf {
        PathBuf::from(format!("{}_frametime.png", self))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Cubes => write!(f, "cubes"),
            Preset::Spheres => write!(f, "spheres"),
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cubes" => Ok(Preset::Cubes),
            "spheres" => Ok(Preset::Spheres),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// Names of the columns read from each benchmark file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    /// Grouping key column
    pub key: String,
    /// Measured value column
    pub value: String,
}

impl ColumnSelection {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Text drawn on the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

/// Everything a single pipeline run needs
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Benchmark files, loaded and combined in this order
    pub inputs: Vec<PathBuf>,
    pub columns: ColumnSelection,
    pub labels: ChartLabels,
    pub tick_scale: TickScale,
    /// Width of each bar, in key units
    pub bar_width: f64,
    /// Chart image; `.svg` selects the SVG backend, anything else is PNG
    pub output: PathBuf,
    /// Optional JSON summary file
    pub summary: Option<PathBuf>,
    /// Show a progress bar while loading
    pub show_progress: bool,
}

impl PipelineConfig {
    /// Default configuration of a benchmark scene
    pub fn for_preset(preset: Preset) -> Self {
        Self {
            inputs: preset.default_inputs(),
            columns: ColumnSelection::new(preset.key_column(), FRAME_TIME_COLUMN),
            labels: preset.labels(),
            tick_scale: TickScale::default(),
            bar_width: DEFAULT_BAR_WIDTH,
            output: preset.default_output(),
            summary: None,
            show_progress: true,
        }
    }

    /// Checks values the command line may have overridden
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }

        if !(self.bar_width.is_finite() && self.bar_width > 0.0) {
            return Err(ConfigError::InvalidBarWidth(self.bar_width));
        }

        Ok(())
    }
}
