//! Type definitions for the license summary data model.
//!
//! This module defines the types shared by the extraction engine and the
//! report writer: license categories and flag records, the raw row/cell
//! model produced by a tabular source, matched users, and the aggregate
//! result handed to the writer. All types serialize with [`serde`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used when joining a sorted role set into a combination key.
pub const COMBINATION_SEPARATOR: &str = " + ";

/// A business-application license category a role may require.
///
/// The category set is fixed; [`LicenseCategory::ALL`] defines the canonical
/// order used everywhere an ordering is needed (flag records, signatures,
/// report columns).
///
/// # Examples
///
/// ```
/// use license_summary_core::LicenseCategory;
///
/// assert_eq!(LicenseCategory::ALL.len(), 5);
/// assert_eq!(LicenseCategory::Scm.to_string(), "SCM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseCategory {
    Finance,
    Scm,
    Commerce,
    Project,
    Hr,
}

impl LicenseCategory {
    /// All categories in canonical report order.
    pub const ALL: [LicenseCategory; 5] = [
        LicenseCategory::Finance,
        LicenseCategory::Scm,
        LicenseCategory::Commerce,
        LicenseCategory::Project,
        LicenseCategory::Hr,
    ];

    /// Business-facing name, as it appears in catalog and report headers.
    pub fn name(self) -> &'static str {
        match self {
            LicenseCategory::Finance => "Finance",
            LicenseCategory::Scm => "SCM",
            LicenseCategory::Commerce => "Commerce",
            LicenseCategory::Project => "Project",
            LicenseCategory::Hr => "HR",
        }
    }
}

impl fmt::Display for LicenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One boolean per license category.
///
/// Used both as a role's requirement footprint in the catalog and as the
/// combined requirement of a role combination (the element-wise OR of its
/// roles' footprints).
///
/// # Examples
///
/// ```
/// use license_summary_core::{LicenseCategory, LicenseFlags};
///
/// let mut flags = LicenseFlags::default();
/// assert!(!flags.any());
///
/// flags.set(LicenseCategory::Finance, true);
/// flags.set(LicenseCategory::Hr, true);
/// assert!(flags.requires(LicenseCategory::Finance));
/// assert_eq!(flags.signature(), "Finance, HR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LicenseFlags {
    pub finance: bool,
    pub scm: bool,
    pub commerce: bool,
    pub project: bool,
    pub hr: bool,
}

impl LicenseFlags {
    /// Creates a record with a single category flagged.
    pub fn only(category: LicenseCategory) -> Self {
        let mut flags = Self::default();
        flags.set(category, true);
        flags
    }

    /// Whether the given category is required.
    pub fn requires(&self, category: LicenseCategory) -> bool {
        match category {
            LicenseCategory::Finance => self.finance,
            LicenseCategory::Scm => self.scm,
            LicenseCategory::Commerce => self.commerce,
            LicenseCategory::Project => self.project,
            LicenseCategory::Hr => self.hr,
        }
    }

    /// Sets the flag for the given category.
    pub fn set(&mut self, category: LicenseCategory, required: bool) {
        match category {
            LicenseCategory::Finance => self.finance = required,
            LicenseCategory::Scm => self.scm = required,
            LicenseCategory::Commerce => self.commerce = required,
            LicenseCategory::Project => self.project = required,
            LicenseCategory::Hr => self.hr = required,
        }
    }

    /// Element-wise OR with another record. Monotonic: a flag that is true
    /// never becomes false.
    pub fn merge(&mut self, other: &LicenseFlags) {
        for category in LicenseCategory::ALL {
            if other.requires(category) {
                self.set(category, true);
            }
        }
    }

    /// Whether any category is required.
    pub fn any(&self) -> bool {
        LicenseCategory::ALL.iter().any(|&c| self.requires(c))
    }

    /// Signature string: the names of the required categories in canonical
    /// order, comma-joined. Empty when no category is required.
    pub fn signature(&self) -> String {
        let names: Vec<&str> = LicenseCategory::ALL
            .iter()
            .filter(|&&c| self.requires(c))
            .map(|c| c.name())
            .collect();
        names.join(", ")
    }
}

/// A single cell value from a tabular source.
///
/// Source tables carry mixed types: free text, numbers, and gaps. The
/// scanner only ever inspects the textual content of a cell; numeric cells
/// matter to the catalog loader (flag columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Missing or blank cell.
    Empty,
    /// Textual content, stored trimmed.
    Text(String),
    /// Numeric content.
    Number(f64),
}

impl Cell {
    /// Builds a cell from a raw text field: blank fields become
    /// [`Cell::Empty`], fields that parse as a number become
    /// [`Cell::Number`], anything else is kept as trimmed [`Cell::Text`].
    ///
    /// # Examples
    ///
    /// ```
    /// use license_summary_core::Cell;
    ///
    /// assert_eq!(Cell::parse("  "), Cell::Empty);
    /// assert_eq!(Cell::parse("1"), Cell::Number(1.0));
    /// assert_eq!(Cell::parse(" Alias "), Cell::Text("Alias".into()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            return Cell::Number(n);
        }
        Cell::Text(trimmed.to_string())
    }

    /// Trimmed textual content, or `None` for empty and numeric cells.
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.trim()),
            _ => None,
        }
    }

    /// Numeric content, or `None` for other variants.
    pub fn number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// An ordered, 0-indexed row of cells. No fixed width is guaranteed across
/// rows; out-of-range access reads as [`Cell::Empty`].
///
/// # Examples
///
/// ```
/// use license_summary_core::{Cell, RawRow};
///
/// let row = RawRow::new(vec![Cell::Text("Alias".into()), Cell::Empty]);
/// assert_eq!(row.text(0), Some("Alias"));
/// assert_eq!(row.text(7), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRow(Vec<Cell>);

impl RawRow {
    const EMPTY: Cell = Cell::Empty;

    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    /// Builds a row by parsing each raw text field with [`Cell::parse`].
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(fields.into_iter().map(|f| Cell::parse(f.as_ref())).collect())
    }

    /// Cell at `index`, or [`Cell::Empty`] past the end of the row.
    pub fn cell(&self, index: usize) -> &Cell {
        self.0.get(index).unwrap_or(&Self::EMPTY)
    }

    /// Trimmed text content of the cell at `index`, if it holds text.
    pub fn text(&self, index: usize) -> Option<&str> {
        self.cell(index).text()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A user together with the deduplicated set of catalog-recognized roles
/// they hold.
///
/// Aliases act as a set key: repeated appearances of the same alias in the
/// source accumulate roles by union before matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedUser {
    pub alias: String,
    pub roles: BTreeSet<String>,
}

impl MatchedUser {
    pub fn new(alias: impl Into<String>, roles: BTreeSet<String>) -> Self {
        Self {
            alias: alias.into(),
            roles,
        }
    }

    /// Canonical combination key: the role set sorted lexicographically and
    /// joined with [`COMBINATION_SEPARATOR`]. Order-independent by
    /// construction, so two users recorded with the same roles in different
    /// orders map to the identical key.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use license_summary_core::MatchedUser;
    ///
    /// let roles: BTreeSet<String> = ["B", "A"].iter().map(|s| s.to_string()).collect();
    /// let user = MatchedUser::new("jdoe", roles);
    /// assert_eq!(user.combination_key(), "A + B");
    /// ```
    pub fn combination_key(&self) -> String {
        let parts: Vec<&str> = self.roles.iter().map(String::as_str).collect();
        parts.join(COMBINATION_SEPARATOR)
    }
}

/// The aggregate handed to the report writer.
///
/// Three views over the same combinations:
///
/// - `ranked` — `(combination key, user count)` sorted by count descending,
///   ties in first-encounter order.
/// - `requirements` — combination key → combined license requirement (the
///   OR of the catalog flags of every role in the combination).
/// - `signature_groups` — license signature → (combination key → count), a
///   disjoint partition of the combinations. Iterates in lexicographic
///   signature order, which is also the writer's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub ranked: Vec<(String, usize)>,
    pub requirements: BTreeMap<String, LicenseFlags>,
    pub signature_groups: BTreeMap<String, BTreeMap<String, usize>>,
}

impl AggregateResult {
    /// Total number of users across all combinations.
    pub fn total_users(&self) -> usize {
        self.ranked.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct combinations.
    pub fn combination_count(&self) -> usize {
        self.ranked.len()
    }
}
