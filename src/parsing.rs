//! File parsing functionality for frame time benchmark data
//!
//! This module handles loading benchmark CSV files (optionally zstd compressed)
//! into [`Dataset`]s.

use crate::common::{Dataset, Measurement};
use crate::config::ColumnSelection;
use bytesize::ByteSize;
use indicatif::ProgressBar;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use zstd::Decoder;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create zstd decoder for {path}: {source}")]
    Decompression {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse CSV in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid value '{value}' for column '{column}' in {path} at line {line}")]
    InvalidField {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Load every file in `paths`, in order
///
/// # Arguments
/// * `paths` - CSV files to load; `.zst` files are decompressed first
/// * `columns` - Names of the key and frame time columns
/// * `progress` - Advanced once per loaded file
///
/// # Returns
/// * `Ok(Vec<Dataset>)` - One dataset per path, in the order given
/// * `Err(ParsingError)` - On the first file that could not be loaded
pub fn load_datasets(
    paths: &[PathBuf],
    columns: &ColumnSelection,
    progress: &ProgressBar,
) -> Result<Vec<Dataset>> {
    progress.set_length(paths.len() as u64);

    let mut datasets = Vec::with_capacity(paths.len());
    for path in paths {
        progress.set_message(path.display().to_string());
        datasets.push(load_dataset(path, columns)?);
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(datasets)
}

/// Parse a single benchmark file into a [`Dataset`]
///
/// The first row is the header. Key and value columns are looked up by name, all
/// other columns are ignored.
///
/// # Arguments
/// * `path` - Path to the CSV (or `.csv.zst`) file
/// * `columns` - Names of the key and frame time columns
///
/// # Returns
/// * `Ok(Dataset)` - Rows in file order
/// * `Err(ParsingError)` - If reading, decompression, or parsing failed
pub fn load_dataset(path: &Path, columns: &ColumnSelection) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| ParsingError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file_size = file.metadata().map(|m| m.len()).unwrap_or_default();

    let reader: Box<dyn Read> = if is_zstd(path) {
        let decoder = Decoder::new(file).map_err(|source| ParsingError::Decompression {
            path: path.to_path_buf(),
            source,
        })?;
        Box::new(decoder)
    } else {
        Box::new(BufReader::new(file))
    };

    let rows = read_measurements(reader, path, columns)?;
    info!(
        path = %path.display(),
        rows = rows.len(),
        size = %ByteSize::b(file_size),
        "loaded benchmark file"
    );

    Ok(Dataset::new(Some(path.to_path_buf()), rows))
}

fn is_zstd(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zst"))
}

fn read_measurements<R: Read>(
    reader: R,
    path: &Path,
    columns: &ColumnSelection,
) -> Result<Vec<Measurement>> {
    let csv_error = |source: csv::Error| ParsingError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| ParsingError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let key_index = column_index(&columns.key)?;
    let value_index = column_index(&columns.value)?;
    debug!(
        path = %path.display(),
        key_index,
        value_index,
        "resolved benchmark columns"
    );

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        // Record lengths match the header, so both indices are present
        let raw_key = record.get(key_index).unwrap_or_default();
        let key = parse_key(raw_key).ok_or_else(|| ParsingError::InvalidField {
            path: path.to_path_buf(),
            line,
            column: columns.key.clone(),
            value: raw_key.to_string(),
        })?;

        let raw_value = record.get(value_index).unwrap_or_default();
        // NaN and infinities cannot be grouped or drawn
        let frame_time_ms = raw_value
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ParsingError::InvalidField {
                path: path.to_path_buf(),
                line,
                column: columns.value.clone(),
                value: raw_value.to_string(),
            })?;

        rows.push(Measurement::new(key, frame_time_ms));
    }

    Ok(rows)
}

/// Parses a group key; integral floats such as `10.0` are accepted.
fn parse_key(raw: &str) -> Option<u32> {
    if let Ok(key) = raw.parse::<u32>() {
        return Some(key);
    }

    let value = raw.parse::<f64>().ok()?;
    let in_range = value >= 0.0 && value <= u32::MAX as f64;
    (in_range && value.fract() == 0.0).then_some(value as u32)
}
