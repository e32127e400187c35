//! Extraction and aggregation engine for license usage summaries.
//!
//! This crate turns a loosely structured license report table into ranked,
//! license-annotated role combination statistics:
//!
//! - [`scanner`] — the row-scanning state machine that recovers per-user
//!   role blocks by content.
//! - [`matcher`] — filters raw role names against the reference catalog.
//! - [`aggregate`] — folds matched users into per-combination counts,
//!   combined license requirements, and signature groups.
//! - [`rank`] — orders combinations by user count.
//! - [`source`] — CSV-backed row source and catalog loader.
//! - [`output`] — renders the aggregate as CSV, JSON, YAML, or an aligned
//!   text table.
//!
//! The main entry point is [`summarize`], which runs the whole pipeline
//! over an in-memory row sequence and returns the aggregate together with
//! a [`ScanReport`] describing the run.
//!
//! # Example
//!
//! ```
//! use license_summary_analysis::{ScanLayout, summarize};
//! use license_summary_core::{LicenseCategory, LicenseFlags, RawRow, RoleCatalog};
//!
//! let mut catalog = RoleCatalog::new();
//! catalog.insert("Accountant", LicenseFlags::only(LicenseCategory::Finance));
//! catalog.insert("Buyer", LicenseFlags::only(LicenseCategory::Scm));
//!
//! let rows = vec![
//!     RawRow::from_fields(["", "", "", "Alias", "", ""]),
//!     RawRow::from_fields(["", "", "", "jdoe", "", ""]),
//!     RawRow::from_fields(["", "", "", "", "", "Security Role"]),
//!     RawRow::from_fields(["", "", "", "", "", "Accountant, Buyer"]),
//! ];
//!
//! let summary = summarize(&rows, &catalog, &ScanLayout::default()).unwrap();
//! assert_eq!(summary.result.ranked, vec![("Accountant + Buyer".to_string(), 1)]);
//! let requirement = &summary.result.requirements["Accountant + Buyer"];
//! assert_eq!(requirement.signature(), "Finance, SCM");
//! ```

pub mod aggregate;
pub mod matcher;
pub mod output;
pub mod rank;
pub mod report;
pub mod scanner;
pub mod source;
pub mod summary;

pub use output::{OutputFormat, format_summary};
pub use report::ScanReport;
pub use scanner::{ScanLayout, scan_rows};
pub use source::{DEFAULT_SKIP_ROWS, SourceError, load_role_catalog, read_report_rows};
pub use summary::{Summary, SummaryError, summarize};
