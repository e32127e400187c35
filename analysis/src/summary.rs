//! The summary pipeline: scan → match → aggregate → rank.

use chrono::Utc;
use license_summary_core::{AggregateResult, RawRow, RoleCatalog};
use thiserror::Error;
use tracing::debug;

use crate::aggregate::aggregate;
use crate::matcher::match_roles;
use crate::rank::rank;
use crate::report::ScanReport;
use crate::scanner::{ScanLayout, scan_rows};

/// Reportable conditions that halt a run before any output is produced.
///
/// Malformed input inside the table never raises; only the total absence
/// of usable data does.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// The role catalog yielded no roles.
    #[error("role catalog contains no roles")]
    CatalogEmpty,

    /// The row source yielded no rows after the leading skip offset.
    #[error("no data rows found after the leading rows were skipped")]
    NoDataRows,

    /// Every discovered user ended with an empty matched-role set.
    #[error("no users matched any role in the catalog")]
    NoMatchingUsers,
}

/// A completed run: the aggregate handed to the writer plus the run report.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub result: AggregateResult,
    pub report: ScanReport,
}

/// Runs the full pipeline over an in-memory row sequence.
///
/// The result depends only on row content and order; re-running on the
/// same input yields an identical [`Summary`] apart from the report
/// timestamp.
///
/// # Examples
///
/// ```
/// use license_summary_analysis::{ScanLayout, summarize};
/// use license_summary_core::{LicenseCategory, LicenseFlags, RawRow, RoleCatalog};
///
/// let mut catalog = RoleCatalog::new();
/// catalog.insert("Accountant", LicenseFlags::only(LicenseCategory::Finance));
///
/// let rows = vec![
///     RawRow::from_fields(["", "", "", "Alias", "", ""]),
///     RawRow::from_fields(["", "", "", "jdoe", "", ""]),
///     RawRow::from_fields(["", "", "", "", "", "Security Role"]),
///     RawRow::from_fields(["", "", "", "", "", "Accountant"]),
/// ];
///
/// let summary = summarize(&rows, &catalog, &ScanLayout::default()).unwrap();
/// assert_eq!(summary.result.ranked, vec![("Accountant".to_string(), 1)]);
/// ```
pub fn summarize(
    rows: &[RawRow],
    catalog: &RoleCatalog,
    layout: &ScanLayout,
) -> Result<Summary, SummaryError> {
    if catalog.is_empty() {
        return Err(SummaryError::CatalogEmpty);
    }
    if rows.is_empty() {
        return Err(SummaryError::NoDataRows);
    }

    let scan = scan_rows(rows, layout);
    debug!(
        users = scan.users.len(),
        blocks = scan.diagnostics.blocks_found,
        malformed = scan.diagnostics.malformed_blocks,
        "scan complete"
    );

    let matched = match_roles(&scan.users, catalog);
    if matched.users.is_empty() {
        return Err(SummaryError::NoMatchingUsers);
    }

    let aggregation = aggregate(&matched.users, catalog);
    let ranked = rank(&aggregation.counts);

    let report = ScanReport {
        generated_at: Utc::now().to_rfc3339(),
        rows_scanned: scan.diagnostics.rows_scanned,
        blocks_found: scan.diagnostics.blocks_found,
        malformed_blocks: scan.diagnostics.malformed_blocks,
        users_discovered: matched.users_discovered,
        users_with_matches: matched.users.len(),
        unmatched_role_names: matched.unmatched_roles,
        distinct_combinations: ranked.len(),
        warnings: scan.diagnostics.warnings(),
    };

    Ok(Summary {
        result: AggregateResult {
            ranked,
            requirements: aggregation.requirements,
            signature_groups: aggregation.signature_groups,
        },
        report,
    })
}

#[cfg(test)]
mod tests {
    use license_summary_core::{LicenseCategory, LicenseFlags};

    use super::*;

    fn catalog() -> RoleCatalog {
        let mut catalog = RoleCatalog::new();
        catalog.insert("Accountant", LicenseFlags::only(LicenseCategory::Finance));
        catalog
    }

    fn block(alias: &str, roles_line: &str) -> Vec<RawRow> {
        vec![
            RawRow::from_fields(["", "", "", "Alias", "", ""]),
            RawRow::from_fields(["", "", "", alias, "", ""]),
            RawRow::from_fields(["", "", "", "", "", "Security Role"]),
            RawRow::from_fields(["", "", "", "", "", roles_line]),
        ]
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let rows = block("jdoe", "Accountant");
        let err = summarize(&rows, &RoleCatalog::new(), &ScanLayout::default()).unwrap_err();
        assert_eq!(err, SummaryError::CatalogEmpty);
    }

    #[test]
    fn test_empty_row_sequence_is_fatal() {
        let err = summarize(&[], &catalog(), &ScanLayout::default()).unwrap_err();
        assert_eq!(err, SummaryError::NoDataRows);
    }

    #[test]
    fn test_all_users_unmatched_is_fatal() {
        let rows = block("jdoe", "Stranger");
        let err = summarize(&rows, &catalog(), &ScanLayout::default()).unwrap_err();
        assert_eq!(err, SummaryError::NoMatchingUsers);
    }

    #[test]
    fn test_report_counts_reflect_the_run() {
        let mut rows = block("jdoe", "Accountant, Stranger");
        rows.extend([
            RawRow::from_fields(["", "", "", "Alias", "", ""]),
            RawRow::from_fields(["", "", "", "broken", "", ""]),
            RawRow::from_fields(["", "", "", "", "", "wrong header"]),
        ]);
        let summary = summarize(&rows, &catalog(), &ScanLayout::default()).unwrap();

        assert_eq!(summary.report.users_discovered, 2);
        assert_eq!(summary.report.users_with_matches, 1);
        assert_eq!(summary.report.malformed_blocks, 1);
        assert_eq!(summary.report.unmatched_role_names, 1);
        assert_eq!(summary.report.distinct_combinations, 1);
        assert_eq!(summary.report.warnings.len(), 1);
    }
}
