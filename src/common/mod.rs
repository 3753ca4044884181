//! Common infrastructure modules shared across pipeline stages
//!
//! This module provides reusable infrastructure for:
//! - Data structures for frame time measurements and their aggregates
//! - ASCII table formatting of per-group statistics
//! - Plotting the highest/average bar chart

pub mod data_structures;
pub mod plots;
pub mod table;

// Re-export commonly used items
pub use data_structures::{Dataset, FrameTimeAggregates, GroupSummary, Measurement};
pub use plots::PlotError;
