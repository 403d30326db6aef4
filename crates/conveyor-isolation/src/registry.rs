// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of discovered plugin descriptors.
//!
//! Maps each qualified name to the ordered set of descriptors registered
//! under it, plus one ordered contract-level view per extension-point
//! contract. The maximal descriptor under the total order is the *active*
//! one for its name. Built incrementally by the single-writer discovery
//! pass, then frozen inside the resolver and read concurrently forever.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use tracing::info;

use conveyor_core::types::PluginContract;

use crate::context::IsolatedContext;
use crate::descriptor::PluginDescriptor;

/// Ordered descriptors (and their owning contexts) registered under one
/// qualified name.
type DescriptorSet = BTreeMap<PluginDescriptor, Arc<IsolatedContext>>;

/// The mapping from qualified name to everything discovered under it.
#[derive(Default)]
pub struct PluginRegistry {
    by_name: HashMap<String, DescriptorSet>,
    connectors: BTreeSet<PluginDescriptor>,
    converters: BTreeSet<PluginDescriptor>,
    transforms: BTreeSet<PluginDescriptor>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one discovered implementation.
    ///
    /// Idempotent for identical descriptors: re-registering the same
    /// (name, version, location) replaces rather than duplicates. The
    /// first registration of a brand-new qualified name is the observable
    /// "new plugin discovered" event.
    pub fn register(&mut self, descriptor: PluginDescriptor, context: Arc<IsolatedContext>) {
        if !self.by_name.contains_key(descriptor.qualified_name()) {
            info!(plugin = %descriptor, "added plugin");
        }
        self.by_name
            .entry(descriptor.qualified_name().to_string())
            .or_default()
            .insert(descriptor.clone(), context);
        self.contract_set_mut(descriptor.contract()).insert(descriptor);
    }

    /// The active (maximal) descriptor for a qualified name, with its
    /// owning context. `None` when the name was never registered.
    pub fn active_for(&self, name: &str) -> Option<(&PluginDescriptor, &Arc<IsolatedContext>)> {
        self.by_name.get(name).and_then(|inner| inner.last_key_value())
    }

    /// Whether any descriptor is registered under this qualified name.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The full, deduplicated, ordered view for one contract, used for
    /// discovery reporting upstream.
    pub fn contract_set(&self, contract: PluginContract) -> &BTreeSet<PluginDescriptor> {
        match contract {
            PluginContract::Connector => &self.connectors,
            PluginContract::Converter => &self.converters,
            PluginContract::Transform => &self.transforms,
        }
    }

    fn contract_set_mut(&mut self, contract: PluginContract) -> &mut BTreeSet<PluginDescriptor> {
        match contract {
            PluginContract::Connector => &mut self.connectors,
            PluginContract::Converter => &mut self.converters,
            PluginContract::Transform => &mut self.transforms,
        }
    }

    /// Number of distinct qualified names registered.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conveyor_core::types::{BundleLocation, PluginVersion};
    use std::path::PathBuf;
    use tracing_test::traced_test;

    fn ctx() -> Arc<IsolatedContext> {
        struct NoLoader;
        impl conveyor_core::traits::SymbolLoader for NoLoader {
            fn load(
                &self,
                _locations: &[PathBuf],
                _name: &str,
            ) -> Result<Option<conveyor_core::types::SymbolPayload>, conveyor_core::ConveyorError>
            {
                Ok(None)
            }
        }
        IsolatedContext::host(vec![], Arc::new(NoLoader))
    }

    fn desc(name: &str, version: &str, location: &str) -> PluginDescriptor {
        PluginDescriptor::new(
            name,
            PluginVersion::new(version),
            PluginContract::Connector,
            BundleLocation::Path(PathBuf::from(location)),
        )
    }

    #[test]
    fn register_then_active_for_roundtrip() {
        let mut registry = PluginRegistry::new();
        let d = desc("org.example.MyConnector", "2", "/plugins/a");
        registry.register(d.clone(), ctx());

        let (active, _) = registry.active_for("org.example.MyConnector").unwrap();
        assert_eq!(active, &d);
    }

    #[test]
    fn active_for_picks_the_maximal_descriptor_deterministically() {
        let mut registry = PluginRegistry::new();
        let v2 = desc("org.example.MyConnector", "2", "/plugins/a");
        let v1 = desc("org.example.MyConnector", "1", "/plugins/b");
        registry.register(v1, ctx());
        registry.register(v2.clone(), ctx());

        for _ in 0..3 {
            let (active, _) = registry.active_for("org.example.MyConnector").unwrap();
            assert_eq!(active, &v2);
        }
    }

    #[test]
    fn identical_registration_is_idempotent() {
        let mut registry = PluginRegistry::new();
        let d = desc("org.example.MyConnector", "2", "/plugins/a");
        registry.register(d.clone(), ctx());
        registry.register(d.clone(), ctx());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.contract_set(PluginContract::Connector).len(), 1);
    }

    #[test]
    fn contract_sets_are_disjoint_and_ordered() {
        let mut registry = PluginRegistry::new();
        let connector = desc("org.example.ZConnector", "1", "/plugins/a");
        let converter = PluginDescriptor::new(
            "org.example.AConverter",
            PluginVersion::new("1"),
            PluginContract::Converter,
            BundleLocation::Path(PathBuf::from("/plugins/a")),
        );
        registry.register(connector.clone(), ctx());
        registry.register(converter.clone(), ctx());

        assert_eq!(
            registry
                .contract_set(PluginContract::Connector)
                .iter()
                .collect::<Vec<_>>(),
            vec![&connector]
        );
        assert_eq!(
            registry
                .contract_set(PluginContract::Converter)
                .iter()
                .collect::<Vec<_>>(),
            vec![&converter]
        );
        assert!(registry.contract_set(PluginContract::Transform).is_empty());
    }

    #[traced_test]
    #[test]
    fn first_registration_of_a_name_emits_the_discovery_event() {
        let mut registry = PluginRegistry::new();
        registry.register(desc("org.example.MyConnector", "1", "/plugins/a"), ctx());
        assert!(logs_contain("added plugin"));
    }
}
