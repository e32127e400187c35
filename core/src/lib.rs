//! Core data model for license usage summaries.
//!
//! This crate defines the foundational types shared by the extraction
//! engine and the report writer:
//!
//! - [`LicenseCategory`] / [`LicenseFlags`] — the fixed category set and a
//!   per-category requirement record.
//! - [`RoleCatalog`] — the reference mapping from role name to the license
//!   categories that role requires.
//! - [`Cell`] / [`RawRow`] — the loose tabular row model the scanner walks
//!   (mixed cell types, no fixed width).
//! - [`MatchedUser`] — a user's deduplicated, catalog-recognized role set,
//!   and the canonical combination key derived from it.
//! - [`AggregateResult`] — the ranked, license-annotated combination
//!   statistics handed to the writer.
//!
//! # Example
//!
//! ```
//! use license_summary_core::*;
//! use std::collections::BTreeSet;
//!
//! let mut catalog = RoleCatalog::new();
//! catalog.insert("Accountant", LicenseFlags::only(LicenseCategory::Finance));
//! catalog.insert("Buyer", LicenseFlags::only(LicenseCategory::Scm));
//!
//! let roles: BTreeSet<String> = ["Buyer", "Accountant"].iter().map(|s| s.to_string()).collect();
//! let user = MatchedUser::new("jdoe", roles);
//! assert_eq!(user.combination_key(), "Accountant + Buyer");
//!
//! let mut combined = LicenseFlags::default();
//! for role in &user.roles {
//!     combined.merge(catalog.get(role).unwrap());
//! }
//! assert_eq!(combined.signature(), "Finance, SCM");
//! ```

mod catalog;
mod types;

pub use catalog::RoleCatalog;
pub use types::*;
