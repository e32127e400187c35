//! Row-scanning extraction state machine.
//!
//! Walks a loosely structured license report table and recovers per-user
//! role blocks by content, not by fixed offsets. A block starts at a row
//! whose marker column holds the block marker text, is followed by the
//! user's alias row and a role header row, and then carries role-list
//! cells until the next block marker or end of input.
//!
//! The walk is an explicit four-state automaton with a single forward
//! cursor. A block whose role header row does not match is abandoned
//! without error: no roles are collected for it and scanning resumes at
//! the next marker candidate.

use std::collections::{BTreeSet, HashMap};

use license_summary_core::{Cell, RawRow};
use tracing::debug;

/// Column indices and marker strings that locate user blocks in the table.
///
/// Defaults match the license report export this tool was built for:
/// block markers and aliases in column 3, role data in column 5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLayout {
    /// Column checked for the block marker text.
    pub marker_column: usize,
    /// Column holding the user alias on the row after the marker.
    pub alias_column: usize,
    /// Column holding the role header and the comma-separated role lists.
    pub role_column: usize,
    /// Literal text marking the start of a user block.
    pub block_marker: String,
    /// Literal text expected in the role column two rows after the marker.
    pub role_marker: String,
}

impl Default for ScanLayout {
    fn default() -> Self {
        Self {
            marker_column: 3,
            alias_column: 3,
            role_column: 5,
            block_marker: "Alias".to_string(),
            role_marker: "Security Role".to_string(),
        }
    }
}

/// One discovered user with the raw (pre-matching) role names collected
/// across every block carrying their alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUser {
    pub alias: String,
    pub roles: BTreeSet<String>,
}

/// Counters describing one scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanDiagnostics {
    pub rows_scanned: usize,
    pub blocks_found: usize,
    pub malformed_blocks: usize,
    pub role_cells_read: usize,
}

impl ScanDiagnostics {
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.malformed_blocks > 0 {
            warnings.push(format!(
                "{} block(s) missing the expected role header were skipped",
                self.malformed_blocks
            ));
        }
        warnings
    }
}

/// Result of scanning a row sequence: users in first-seen alias order plus
/// scan counters.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub users: Vec<RawUser>,
    pub diagnostics: ScanDiagnostics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingHeader,
    ExpectAlias,
    ExpectRoleHeader,
    CollectingRoles,
}

/// Scans raw rows into per-user raw role sets.
///
/// The result depends only on row content and order. Repeated aliases
/// reuse the user registered at first sight and union further roles into
/// it.
pub fn scan_rows(rows: &[RawRow], layout: &ScanLayout) -> ScanOutcome {
    let mut scanner = RowScanner::new(layout);
    for row in rows {
        scanner.diagnostics.rows_scanned += 1;
        // A marker row ending a block is not consumed by CollectingRoles;
        // it is re-examined as the next block's header.
        while !scanner.step(row) {}
    }
    scanner.finish()
}

struct RowScanner<'a> {
    layout: &'a ScanLayout,
    state: ScanState,
    users: Vec<RawUser>,
    index: HashMap<String, usize>,
    current: Option<usize>,
    diagnostics: ScanDiagnostics,
}

impl<'a> RowScanner<'a> {
    fn new(layout: &'a ScanLayout) -> Self {
        Self {
            layout,
            state: ScanState::SeekingHeader,
            users: Vec::new(),
            index: HashMap::new(),
            current: None,
            diagnostics: ScanDiagnostics::default(),
        }
    }

    /// Processes one row under the current state. Returns `false` when the
    /// row must be re-examined under the new state.
    fn step(&mut self, row: &RawRow) -> bool {
        match self.state {
            ScanState::SeekingHeader => {
                if self.is_block_marker(row) {
                    self.state = ScanState::ExpectAlias;
                }
                true
            }
            ScanState::ExpectAlias => {
                match alias_text(row.cell(self.layout.alias_column)) {
                    Some(alias) => {
                        self.register_user(alias);
                        self.diagnostics.blocks_found += 1;
                        self.state = ScanState::ExpectRoleHeader;
                    }
                    None => {
                        debug!("block marker not followed by an alias cell");
                        self.diagnostics.malformed_blocks += 1;
                        self.current = None;
                        self.state = ScanState::SeekingHeader;
                    }
                }
                true
            }
            ScanState::ExpectRoleHeader => {
                let matched = row
                    .text(self.layout.role_column)
                    .is_some_and(|text| text == self.layout.role_marker);
                if matched {
                    self.state = ScanState::CollectingRoles;
                } else {
                    debug!("block missing role header, abandoning");
                    self.diagnostics.malformed_blocks += 1;
                    self.current = None;
                    self.state = ScanState::SeekingHeader;
                }
                true
            }
            ScanState::CollectingRoles => {
                if self.is_block_marker(row) {
                    self.current = None;
                    self.state = ScanState::SeekingHeader;
                    return false;
                }
                if let Some(text) = row.text(self.layout.role_column) {
                    if !text.is_empty() {
                        self.diagnostics.role_cells_read += 1;
                        self.collect_roles(text);
                    }
                }
                true
            }
        }
    }

    fn finish(self) -> ScanOutcome {
        // End of input in any state is a clean exit; a dangling block just
        // stops collecting.
        ScanOutcome {
            users: self.users,
            diagnostics: self.diagnostics,
        }
    }

    fn is_block_marker(&self, row: &RawRow) -> bool {
        row.text(self.layout.marker_column)
            .is_some_and(|text| text == self.layout.block_marker)
    }

    fn register_user(&mut self, alias: String) {
        let idx = match self.index.get(&alias) {
            Some(&idx) => idx,
            None => {
                debug!(alias = %alias, "found user");
                let idx = self.users.len();
                self.users.push(RawUser {
                    alias: alias.clone(),
                    roles: BTreeSet::new(),
                });
                self.index.insert(alias, idx);
                idx
            }
        };
        self.current = Some(idx);
    }

    fn collect_roles(&mut self, cell_text: &str) {
        let Some(idx) = self.current else {
            return;
        };
        for piece in cell_text.split(',') {
            let role = piece.trim();
            if !role.is_empty() {
                self.users[idx].roles.insert(role.to_string());
            }
        }
    }
}

/// Alias content of a cell. Numeric aliases are rendered as text, integral
/// values without a fractional part.
fn alias_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Text(s) => Some(s.trim().to_string()),
        Cell::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(format!("{}", *n as i64)),
        Cell::Number(n) => Some(n.to_string()),
        Cell::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_row(layout: &ScanLayout) -> RawRow {
        let mut fields = vec![String::new(); layout.marker_column + 1];
        fields[layout.marker_column] = layout.block_marker.clone();
        RawRow::from_fields(fields)
    }

    fn alias_row(layout: &ScanLayout, alias: &str) -> RawRow {
        let mut fields = vec![String::new(); layout.alias_column + 1];
        fields[layout.alias_column] = alias.to_string();
        RawRow::from_fields(fields)
    }

    fn role_cell_row(layout: &ScanLayout, text: &str) -> RawRow {
        let mut fields = vec![String::new(); layout.role_column + 1];
        fields[layout.role_column] = text.to_string();
        RawRow::from_fields(fields)
    }

    fn block(layout: &ScanLayout, alias: &str, role_lines: &[&str]) -> Vec<RawRow> {
        let mut rows = vec![
            marker_row(layout),
            alias_row(layout, alias),
            role_cell_row(layout, &layout.role_marker),
        ];
        for line in role_lines {
            rows.push(role_cell_row(layout, line));
        }
        rows
    }

    fn roles(user: &RawUser) -> Vec<&str> {
        user.roles.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_single_block_collects_split_roles() {
        let layout = ScanLayout::default();
        let rows = block(&layout, "jdoe", &["Accountant, Buyer", "Clerk"]);
        let outcome = scan_rows(&rows, &layout);

        assert_eq!(outcome.users.len(), 1);
        assert_eq!(outcome.users[0].alias, "jdoe");
        assert_eq!(roles(&outcome.users[0]), ["Accountant", "Buyer", "Clerk"]);
        assert_eq!(outcome.diagnostics.blocks_found, 1);
        assert_eq!(outcome.diagnostics.malformed_blocks, 0);
    }

    #[test]
    fn test_block_boundary_row_is_not_skipped() {
        let layout = ScanLayout::default();
        let mut rows = block(&layout, "a", &["Accountant"]);
        rows.extend(block(&layout, "b", &["Buyer"]));
        let outcome = scan_rows(&rows, &layout);

        assert_eq!(outcome.users.len(), 2);
        assert_eq!(roles(&outcome.users[0]), ["Accountant"]);
        assert_eq!(roles(&outcome.users[1]), ["Buyer"]);
    }

    #[test]
    fn test_repeated_alias_unions_roles() {
        let layout = ScanLayout::default();
        let mut rows = block(&layout, "jdoe", &["Accountant"]);
        rows.extend(block(&layout, "jdoe", &["Buyer, Accountant"]));
        let outcome = scan_rows(&rows, &layout);

        assert_eq!(outcome.users.len(), 1);
        assert_eq!(roles(&outcome.users[0]), ["Accountant", "Buyer"]);
        assert_eq!(outcome.diagnostics.blocks_found, 2);
    }

    #[test]
    fn test_malformed_block_is_abandoned_and_scan_resumes() {
        let layout = ScanLayout::default();
        let mut rows = vec![
            marker_row(&layout),
            alias_row(&layout, "broken"),
            role_cell_row(&layout, "not the role header"),
            role_cell_row(&layout, "Accountant"),
        ];
        rows.extend(block(&layout, "intact", &["Buyer"]));
        let outcome = scan_rows(&rows, &layout);

        assert_eq!(outcome.diagnostics.malformed_blocks, 1);
        assert_eq!(outcome.users.len(), 2);
        let broken = &outcome.users[0];
        assert_eq!(broken.alias, "broken");
        assert!(broken.roles.is_empty());
        assert_eq!(roles(&outcome.users[1]), ["Buyer"]);
    }

    #[test]
    fn test_empty_and_whitespace_pieces_are_dropped() {
        let layout = ScanLayout::default();
        let rows = block(&layout, "jdoe", &[" Accountant ,, Buyer , "]);
        let outcome = scan_rows(&rows, &layout);
        assert_eq!(roles(&outcome.users[0]), ["Accountant", "Buyer"]);
    }

    #[test]
    fn test_truncated_input_terminates_cleanly() {
        let layout = ScanLayout::default();
        // Ends right after the alias row.
        let rows = vec![marker_row(&layout), alias_row(&layout, "jdoe")];
        let outcome = scan_rows(&rows, &layout);
        assert_eq!(outcome.users.len(), 1);
        assert!(outcome.users[0].roles.is_empty());
    }

    #[test]
    fn test_numeric_alias_is_rendered_as_text() {
        let layout = ScanLayout::default();
        let mut rows = block(&layout, "", &[]);
        rows[1] = {
            let mut fields = vec![String::new(); layout.alias_column + 1];
            fields[layout.alias_column] = "10452".to_string();
            RawRow::from_fields(fields)
        };
        rows.push(role_cell_row(&layout, "Accountant"));
        let outcome = scan_rows(&rows, &layout);
        assert_eq!(outcome.users[0].alias, "10452");
    }

    #[test]
    fn test_custom_layout_columns() {
        let layout = ScanLayout {
            marker_column: 0,
            alias_column: 1,
            role_column: 2,
            block_marker: "User".to_string(),
            role_marker: "Roles".to_string(),
        };
        let rows = vec![
            RawRow::from_fields(["User", "", ""]),
            RawRow::from_fields(["", "jdoe", ""]),
            RawRow::from_fields(["", "", "Roles"]),
            RawRow::from_fields(["", "", "Accountant"]),
        ];
        let outcome = scan_rows(&rows, &layout);
        assert_eq!(outcome.users.len(), 1);
        assert_eq!(roles(&outcome.users[0]), ["Accountant"]);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let layout = ScanLayout::default();
        let mut rows = block(&layout, "a", &["Accountant, Buyer"]);
        rows.extend(block(&layout, "b", &["Buyer"]));
        let first = scan_rows(&rows, &layout);
        let second = scan_rows(&rows, &layout);
        assert_eq!(first, second);
    }
}
