// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short-name aliases for registered plugins.
//!
//! Each registered implementation may gain up to two extra lookup keys: its
//! `simple` name (final dot-segment of the qualified name) and its `pruned`
//! name (simple name with the contract's conventional suffix stripped). An
//! alias is only ever committed when it unambiguously identifies a single
//! qualified name -- aliasing must never silently merge two different
//! plugins. Collisions are a policy decision, not an error: the alias is
//! simply not registered.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, info};

use conveyor_core::types::PluginContract;

use crate::registry::PluginRegistry;

/// The simple short form of a qualified name: its final dot-segment.
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(qualified_name)
}

/// The disambiguated short form: the simple name with the contract's
/// conventional suffix stripped, when stripping leaves a non-empty
/// remainder. Otherwise equal to the simple name.
pub fn pruned_name(simple: &str, contract: PluginContract) -> &str {
    match simple.strip_suffix(contract.alias_suffix()) {
        Some(remainder) if !remainder.is_empty() => remainder,
        _ => simple,
    }
}

/// Alias lookup table, derived from the full registry exactly once after
/// all bundles have been scanned. Maps alias to canonical qualified name.
#[derive(Debug, Default)]
pub struct AliasIndex {
    aliases: HashMap<String, String>,
}

impl AliasIndex {
    /// Build the global alias table.
    ///
    /// Two-phase, per the collision rules:
    /// 1. Per contract set, a descriptor is alias-eligible iff its simple
    ///    name is not shared by any other distinct qualified name in the
    ///    same contract set (different versions of the same name never
    ///    block each other). Every candidate key (simple and pruned) of
    ///    every eligible name is collected first.
    /// 2. Only candidate keys claimed by exactly one qualified name -- and
    ///    not shadowing a registered qualified name -- are committed.
    ///
    /// Collecting before committing means a late collision can never leak
    /// a partially-registered ambiguous alias.
    pub fn build(registry: &PluginRegistry) -> Self {
        // Candidate alias -> distinct qualified names claiming it. BTree
        // containers keep commit order (and logs) deterministic.
        let mut candidates: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for contract in PluginContract::ALL {
            let set = registry.contract_set(contract);

            let mut simple_owners: HashMap<&str, BTreeSet<&str>> = HashMap::new();
            for descriptor in set {
                simple_owners
                    .entry(simple_name(descriptor.qualified_name()))
                    .or_default()
                    .insert(descriptor.qualified_name());
            }

            for descriptor in set {
                let qualified = descriptor.qualified_name();
                let simple = simple_name(qualified);
                if simple_owners[simple].len() > 1 {
                    debug!(
                        alias = simple,
                        plugin = qualified,
                        "alias collides within contract set, skipped"
                    );
                    continue;
                }
                candidates
                    .entry(simple.to_string())
                    .or_default()
                    .insert(qualified.to_string());
                let pruned = pruned_name(simple, contract);
                if pruned != simple {
                    candidates
                        .entry(pruned.to_string())
                        .or_default()
                        .insert(qualified.to_string());
                }
            }
        }

        let mut index = AliasIndex::default();
        for (alias, owners) in candidates {
            if owners.len() > 1 {
                debug!(alias = %alias, "alias claimed by multiple plugins, skipped");
                continue;
            }
            if registry.contains(&alias) {
                debug!(alias = %alias, "alias shadows a registered name, skipped");
                continue;
            }
            let qualified = owners.into_iter().next().unwrap_or_default();
            info!(alias = %alias, plugin = %qualified, "added alias");
            index.aliases.insert(alias, qualified);
        }
        index
    }

    /// The canonical qualified name an alias resolves to, if any.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
