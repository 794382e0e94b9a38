//! Role-Based Permission Evaluation
//!
//! Maps roles to permission grants and evaluates whether a held role set
//! satisfies a requested permission. The table is built once from
//! configuration; evaluation is O(grants) per request and allocation-free.

use gateguard_domain::error::Result;
use gateguard_domain::value_objects::{Grant, Permission};
use std::collections::{BTreeSet, HashMap};

/// Role table mapping role names to their owned grants.
///
/// Unknown roles contribute no grants and do not error: they are silently
/// powerless. A role set with zero roles never satisfies anything.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    roles: HashMap<String, BTreeSet<Grant>>,
}

impl RoleTable {
    /// Build a role table from a role → grant-strings map, e.g. from
    /// configuration. Malformed grant strings are a configuration error.
    pub fn from_grants(table: &HashMap<String, Vec<String>>) -> Result<Self> {
        let mut roles = HashMap::with_capacity(table.len());
        for (role, grants) in table {
            let parsed: Result<BTreeSet<Grant>> =
                grants.iter().map(|raw| Grant::parse(raw)).collect();
            roles.insert(role.clone(), parsed?);
        }
        Ok(Self { roles })
    }

    /// Whether any role in `role_set` owns a grant satisfying `requested`.
    pub fn has_permission(&self, role_set: &[String], requested: &Permission) -> bool {
        role_set.iter().any(|role| {
            self.roles
                .get(role)
                .is_some_and(|grants| grants.iter().any(|grant| grant.satisfies(requested)))
        })
    }

    /// Union of all grants across `role_set`, duplicates collapsed.
    ///
    /// Used for introspection ("whoami") responses.
    pub fn permissions_for(&self, role_set: &[String]) -> BTreeSet<Grant> {
        role_set
            .iter()
            .filter_map(|role| self.roles.get(role))
            .flatten()
            .cloned()
            .collect()
    }

}
