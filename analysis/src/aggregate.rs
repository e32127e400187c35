//! Combination aggregation engine.
//!
//! Folds matched users into per-combination statistics: how many users
//! share exactly the same role set, which license categories that set
//! requires, and how combinations group by their license signature.

use std::collections::{BTreeMap, HashMap};

use license_summary_core::{LicenseFlags, MatchedUser, RoleCatalog};

/// Per-combination statistics before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Combination key → user count, in first-encounter key order. This
    /// order seeds the ranker's tie-break.
    pub counts: Vec<(String, usize)>,
    /// Combination key → combined license requirement (OR across the
    /// catalog flags of every role in the combination).
    pub requirements: BTreeMap<String, LicenseFlags>,
    /// License signature → (combination key → count). A disjoint partition
    /// of the combinations.
    pub signature_groups: BTreeMap<String, BTreeMap<String, usize>>,
}

/// Groups users by exact role set and computes license statistics per
/// distinct combination.
pub fn aggregate(users: &[MatchedUser], catalog: &RoleCatalog) -> Aggregation {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut requirements: BTreeMap<String, LicenseFlags> = BTreeMap::new();

    for user in users {
        let key = user.combination_key();
        match index.get(&key) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                // First sighting of this combination: compute its combined
                // requirement once.
                let mut combined = LicenseFlags::default();
                for role in &user.roles {
                    if let Some(flags) = catalog.get(role) {
                        combined.merge(flags);
                    }
                }
                requirements.insert(key.clone(), combined);
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    let mut signature_groups: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for (key, count) in &counts {
        let signature = requirements
            .get(key)
            .map(LicenseFlags::signature)
            .unwrap_or_default();
        signature_groups
            .entry(signature)
            .or_default()
            .insert(key.clone(), *count);
    }

    Aggregation {
        counts,
        requirements,
        signature_groups,
    }
}
