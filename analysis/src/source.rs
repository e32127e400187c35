//! Tabular file sources: the license report rows and the role catalog.
//!
//! Both sources are CSV exports. The report is read without header
//! handling (the scanner locates blocks by content) and the first
//! [`DEFAULT_SKIP_ROWS`] rows are boilerplate above the data. The catalog
//! has a single header row followed by one role per row.

use std::fs::File;
use std::path::Path;

use license_summary_core::{RawRow, RoleCatalog};
use tracing::debug;

/// Rows of export boilerplate above the first data row; data begins at
/// row 20 of the report file.
pub const DEFAULT_SKIP_ROWS: usize = 19;

/// Errors from reading tabular source files.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads the license report rows in file order, skipping the first
/// `skip_rows` rows. Rows may have any width; fields are parsed into the
/// mixed-type cell model. The file handle is released when the function
/// returns, on success or error.
pub fn read_report_rows(path: &Path, skip_rows: usize) -> Result<Vec<RawRow>, SourceError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if index < skip_rows {
            continue;
        }
        rows.push(RawRow::from_fields(record.iter()));
    }
    debug!(rows = rows.len(), skipped = skip_rows, "report rows read");
    Ok(rows)
}

/// Loads the role catalog: one header row, then role name in column 0 and
/// the five per-category flag columns after it.
pub fn load_role_catalog(path: &Path) -> Result<RoleCatalog, SourceError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RawRow::from_fields(record.iter()));
    }
    let catalog = RoleCatalog::from_rows(&rows);
    debug!(roles = catalog.len(), "role catalog loaded");
    Ok(catalog)
}
