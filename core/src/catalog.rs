//! The role catalog: role name → license requirement footprint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Cell, LicenseCategory, LicenseFlags, RawRow};

/// Reference catalog mapping each known role to the license categories it
/// requires.
///
/// Role names are unique and non-empty. Lookup is exact and case-sensitive;
/// no normalization is applied beyond the trimming the row model already
/// performs.
///
/// # Examples
///
/// ```
/// use license_summary_core::{LicenseCategory, LicenseFlags, RoleCatalog};
///
/// let mut catalog = RoleCatalog::new();
/// catalog.insert("Accountant", LicenseFlags::only(LicenseCategory::Finance));
///
/// assert!(catalog.contains("Accountant"));
/// assert!(!catalog.contains("accountant"));
/// assert_eq!(catalog.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleCatalog {
    roles: BTreeMap<String, LicenseFlags>,
}

impl RoleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from raw catalog rows.
    ///
    /// Column 0 holds the role name; columns 1 through 5 hold the
    /// per-category flags in canonical category order, where a numeric `1`
    /// means required and anything else (blank, text, other numbers) means
    /// not required. Rows without a textual role name are skipped. A role
    /// name appearing twice keeps the later row, matching
    /// last-assignment-wins map building.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let mut catalog = Self::new();
        for row in rows {
            let Some(name) = row.text(0) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let mut flags = LicenseFlags::default();
            for (offset, category) in LicenseCategory::ALL.iter().enumerate() {
                flags.set(*category, flag_cell(row.cell(offset + 1)));
            }
            catalog.insert(name, flags);
        }
        catalog
    }

    pub fn insert(&mut self, role: impl Into<String>, flags: LicenseFlags) {
        self.roles.insert(role.into(), flags);
    }

    /// Flags for `role`, if the catalog knows it.
    pub fn get(&self, role: &str) -> Option<&LicenseFlags> {
        self.roles.get(role)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Iterates roles in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LicenseFlags)> {
        self.roles.iter().map(|(name, flags)| (name.as_str(), flags))
    }
}

/// A flag column counts as required only for a numeric 1.
fn flag_cell(cell: &Cell) -> bool {
    matches!(cell, Cell::Number(n) if *n == 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_reads_flag_columns_in_order() {
        let rows = [RawRow::from_fields(["Accountant", "1", "", "", "1", ""])];
        let catalog = RoleCatalog::from_rows(&rows);
        let flags = catalog.get("Accountant").unwrap();
        assert!(flags.finance);
        assert!(!flags.scm);
        assert!(!flags.commerce);
        assert!(flags.project);
        assert!(!flags.hr);
    }

    #[test]
    fn test_from_rows_skips_rows_without_a_name() {
        let rows = [
            RawRow::from_fields(["", "1"]),
            RawRow::from_fields(["7", "1"]),
            RawRow::from_fields(["Buyer", "", "1"]),
        ];
        let catalog = RoleCatalog::from_rows(&rows);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("Buyer"));
    }

    #[test]
    fn test_from_rows_non_one_values_are_not_required() {
        let rows = [RawRow::from_fields(["Clerk", "2", "x", "0", "yes", ""])];
        let catalog = RoleCatalog::from_rows(&rows);
        assert!(!catalog.get("Clerk").unwrap().any());
    }

    #[test]
    fn test_from_rows_short_rows_default_to_not_required() {
        let rows = [RawRow::from_fields(["Clerk", "1"])];
        let catalog = RoleCatalog::from_rows(&rows);
        let flags = catalog.get("Clerk").unwrap();
        assert!(flags.finance);
        assert!(!flags.hr);
    }

    #[test]
    fn test_duplicate_role_keeps_last_row() {
        let rows = [
            RawRow::from_fields(["Clerk", "1"]),
            RawRow::from_fields(["Clerk", "", "1"]),
        ];
        let catalog = RoleCatalog::from_rows(&rows);
        let flags = catalog.get("Clerk").unwrap();
        assert!(!flags.finance);
        assert!(flags.scm);
        assert_eq!(catalog.len(), 1);
    }
}
