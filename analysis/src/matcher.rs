//! Catalog filtering of raw role sets.

use license_summary_core::{MatchedUser, RoleCatalog};
use tracing::debug;

use crate::scanner::RawUser;

/// Result of matching scanned users against the role catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Users with at least one catalog-recognized role, in first-seen order.
    pub users: Vec<MatchedUser>,
    /// Number of users discovered by the scan, matched or not.
    pub users_discovered: usize,
    /// Role name occurrences that were absent from the catalog.
    pub unmatched_roles: usize,
}

/// Keeps, per user, only the role names that exist in the catalog (exact,
/// case-sensitive match). Users whose matched set comes out empty are
/// dropped and contribute no combination.
pub fn match_roles(scanned: &[RawUser], catalog: &RoleCatalog) -> MatchOutcome {
    let mut users = Vec::new();
    let mut unmatched_roles = 0usize;

    for user in scanned {
        let mut matched = std::collections::BTreeSet::new();
        for role in &user.roles {
            if catalog.contains(role) {
                matched.insert(role.clone());
            } else {
                unmatched_roles += 1;
            }
        }
        if matched.is_empty() {
            debug!(alias = %user.alias, "no catalog roles matched, dropping user");
            continue;
        }
        users.push(MatchedUser::new(user.alias.clone(), matched));
    }

    MatchOutcome {
        users,
        users_discovered: scanned.len(),
        unmatched_roles,
    }
}
