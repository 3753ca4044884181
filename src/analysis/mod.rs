//! Frame time analysis modules
//!
//! This module contains the analysis logic for:
//! - Combining and aggregating measurements by key
//! - The value axis tick scale
//! - Summary output

pub mod aggregate;
pub mod summary;
pub mod ticks;

// Re-export analysis functions for convenience
pub use aggregate::{aggregate, combine};
pub use summary::{format_summary, write_json_summary, SummaryError};
pub use ticks::TickScale;
