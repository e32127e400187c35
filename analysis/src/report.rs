//! Structured run reporting.

use serde::{Deserialize, Serialize};

/// Diagnostic report for one summary run.
///
/// Malformed blocks and unmatched role names are tolerated during the run;
/// this report is where they become visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// RFC 3339 timestamp for when the run finished.
    pub generated_at: String,
    pub rows_scanned: usize,
    pub blocks_found: usize,
    pub malformed_blocks: usize,
    pub users_discovered: usize,
    pub users_with_matches: usize,
    pub unmatched_role_names: usize,
    pub distinct_combinations: usize,
    pub warnings: Vec<String>,
}
