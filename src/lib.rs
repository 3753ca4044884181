//! # frametime-stats
//!
//! Aggregates frame time benchmark results (CSV) by scene size and charts the
//! highest and average frame time per group.
//!
//! The work happens in four steps, each usable on its own:
//! [`parsing::load_datasets`], [`analysis::combine`], [`analysis::aggregate`] and a
//! [`common::plots::ChartRenderer`]. [`pipeline::run`] composes them.

pub mod analysis;
pub mod common;
pub mod config;
pub mod parsing;
pub mod pipeline;

use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Parsing error: {0}")]
    Parsing(#[from] parsing::ParsingError),

    #[error("Summary error: {0}")]
    Summary(#[from] analysis::SummaryError),

    #[error("Plot error: {0}")]
    Plot(#[from] common::PlotError),
}

pub type Result<T> = core::result::Result<T, AnalysisError>;
