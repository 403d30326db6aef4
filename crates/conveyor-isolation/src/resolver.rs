// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The delegating resolver: the engine's public entry point.
//!
//! Answers "which namespace provides symbol X" with a fixed decision
//! sequence: isolation exemption first, then registry-routed lookup
//! (where failure is hard -- the registry claimed ownership), then a
//! fallback scan across active bundle contexts in discovery order, then
//! the host. The resolver is the frozen product of a discovery pass:
//! every structure it holds is immutable after construction, so
//! concurrent `resolve` calls need no locking.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, error};

use conveyor_core::error::ConveyorError;
use conveyor_core::traits::LoadContext;
use conveyor_core::types::{BundleLocation, PluginContract, Symbol};

use crate::alias::AliasIndex;
use crate::context::IsolatedContext;
use crate::descriptor::PluginDescriptor;
use crate::policy::IsolationPolicy;
use crate::registry::PluginRegistry;

/// A successful resolution: the namespace that provides the symbol, and
/// the symbol it produced. The instantiation layer above uses the context
/// to construct plugin instances.
pub struct Resolution {
    pub context: Arc<dyn LoadContext>,
    pub symbol: Symbol,
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}

/// The frozen resolution engine.
///
/// Built once by [`PluginDiscovery`](crate::discovery::PluginDiscovery)
/// (single-writer-then-freeze) and shared behind an `Arc` for concurrent
/// reads.
pub struct DelegatingResolver {
    host: Arc<IsolatedContext>,
    registry: PluginRegistry,
    aliases: AliasIndex,
    /// Bundle contexts that contributed at least one extension-point
    /// implementation, in discovery order -- the documented stable order
    /// of the fallback scan.
    active: Vec<(BundleLocation, Arc<IsolatedContext>)>,
    policy: IsolationPolicy,
    location: BundleLocation,
}

impl DelegatingResolver {
    pub(crate) fn new(
        host: Arc<IsolatedContext>,
        registry: PluginRegistry,
        aliases: AliasIndex,
        active: Vec<(BundleLocation, Arc<IsolatedContext>)>,
        policy: IsolationPolicy,
    ) -> Arc<Self> {
        Arc::new(DelegatingResolver {
            host,
            registry,
            aliases,
            active,
            policy,
            location: BundleLocation::Host,
        })
    }

    /// Resolve a qualified name or alias to the namespace that provides it.
    ///
    /// Decision sequence:
    /// 1. Names exempt from isolation resolve through the host context
    ///    only, before any registry lookup.
    /// 2. Registered names (or aliases) resolve in the active descriptor's
    ///    owning context. If that isolated resolution fails, the failure
    ///    is [`ConveyorError::Unresolvable`] and is never retried
    ///    elsewhere -- the registry claimed ownership.
    /// 3. Unregistered names are scanned for across active bundle contexts
    ///    in discovery order; the first context that *owns* the symbol
    ///    wins.
    /// 4. The host context is the final fallback; a miss there is the
    ///    typed [`ConveyorError::NotFound`] outcome.
    pub fn resolve(&self, name: &str) -> Result<Resolution, ConveyorError> {
        if self.policy.is_exempt(name) {
            debug!(symbol = name, "exempt from isolation, resolving via host");
            let symbol = self.host.resolve_symbol(name)?;
            return Ok(Resolution {
                context: self.host.clone(),
                symbol,
            });
        }

        if let Some((descriptor, context)) = self.lookup(name) {
            debug!(symbol = name, plugin = %descriptor, "registry-routed resolution");
            return match context.resolve_symbol(descriptor.qualified_name()) {
                Ok(symbol) => Ok(Resolution {
                    context: context.clone(),
                    symbol,
                }),
                Err(err) => {
                    error!(
                        symbol = name,
                        plugin = %descriptor,
                        error = %err,
                        "registered symbol unresolvable in its owning context"
                    );
                    let source: Option<Box<dyn std::error::Error + Send + Sync>> =
                        if err.is_not_found() { None } else { Some(Box::new(err)) };
                    Err(ConveyorError::Unresolvable {
                        name: descriptor.qualified_name().to_string(),
                        location: descriptor.location().clone(),
                        source,
                    })
                }
            };
        }

        for (location, context) in &self.active {
            if let Some(symbol) = context.resolve_local(name)? {
                debug!(symbol = name, context = %location, "resolved via fallback scan");
                return Ok(Resolution {
                    context: context.clone(),
                    symbol,
                });
            }
        }

        match self.host.resolve_symbol(name) {
            Ok(symbol) => Ok(Resolution {
                context: self.host.clone(),
                symbol,
            }),
            Err(err) if err.is_not_found() => Err(ConveyorError::not_found(name)),
            Err(err) => Err(err),
        }
    }

    /// Narrow convenience lookup: the owning context for a registered name
    /// or alias, degrading to the resolver itself when the name is
    /// entirely unknown. Callers may use the returned context merely as a
    /// delegation base, so an unknown name is not an error here.
    pub fn context_for(self: &Arc<Self>, name: &str) -> Arc<dyn LoadContext> {
        debug!(symbol = name, "plugin context lookup");
        match self.lookup(name) {
            Some((_, context)) => context.clone(),
            None => {
                error!(symbol = name, "no plugin context found, returning engine context");
                self.clone()
            }
        }
    }

    /// The active descriptor a name or alias routes to, if registered.
    pub fn active_for(&self, name: &str) -> Option<&PluginDescriptor> {
        self.lookup(name).map(|(descriptor, _)| descriptor)
    }

    /// The canonical qualified name behind an alias, if one was committed.
    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.aliases.resolve(alias)
    }

    /// Ordered view of everything discovered for one contract.
    pub fn contract_set(&self, contract: PluginContract) -> &BTreeSet<PluginDescriptor> {
        self.registry.contract_set(contract)
    }

    pub fn connectors(&self) -> &BTreeSet<PluginDescriptor> {
        self.contract_set(PluginContract::Connector)
    }

    pub fn converters(&self) -> &BTreeSet<PluginDescriptor> {
        self.contract_set(PluginContract::Converter)
    }

    pub fn transforms(&self) -> &BTreeSet<PluginDescriptor> {
        self.contract_set(PluginContract::Transform)
    }

    /// The active-contexts table, in discovery order.
    pub fn active_contexts(&self) -> &[(BundleLocation, Arc<IsolatedContext>)] {
        &self.active
    }

    pub fn host(&self) -> &Arc<IsolatedContext> {
        &self.host
    }

    fn lookup(&self, name: &str) -> Option<(&PluginDescriptor, &Arc<IsolatedContext>)> {
        self.registry.active_for(name).or_else(|| {
            self.aliases
                .resolve(name)
                .and_then(|qualified| self.registry.active_for(qualified))
        })
    }
}

impl LoadContext for DelegatingResolver {
    fn resolve_symbol(&self, name: &str) -> Result<Symbol, ConveyorError> {
        self.resolve(name).map(|resolution| resolution.symbol)
    }

    fn location(&self) -> &BundleLocation {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conveyor_core::traits::SymbolLoader;
    use conveyor_core::types::{PluginVersion, SymbolPayload};
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;

    struct MapLoader(HashMap<PathBuf, HashSet<String>>);

    impl MapLoader {
        fn new(entries: &[(&str, &[&str])]) -> Arc<Self> {
            Arc::new(MapLoader(
                entries
                    .iter()
                    .map(|(loc, names)| {
                        (
                            PathBuf::from(loc),
                            names.iter().map(|n| n.to_string()).collect(),
                        )
                    })
                    .collect(),
            ))
        }
    }

    impl SymbolLoader for MapLoader {
        fn load(
            &self,
            locations: &[PathBuf],
            name: &str,
        ) -> Result<Option<SymbolPayload>, ConveyorError> {
            for location in locations {
                if self.0.get(location).is_some_and(|names| names.contains(name)) {
                    return Ok(Some(Arc::new(name.to_string())));
                }
            }
            Ok(None)
        }
    }

    struct Fixture {
        resolver: Arc<DelegatingResolver>,
    }

    /// Host owns the shared contract type and a shadowed copy of the
    /// connector name; bundle `a` owns MyConnector v2 plus a helper;
    /// bundle `b` owns MyConnector v1 plus the same helper name.
    fn fixture(policy: IsolationPolicy) -> Fixture {
        let loader = MapLoader::new(&[
            ("/host", &["org.conveyor.Contract", "org.example.MyConnector"]),
            (
                "/plugins/a",
                &["org.example.MyConnector", "org.example.internal.Helper"],
            ),
            (
                "/plugins/b",
                &["org.example.MyConnector", "org.example.internal.Helper"],
            ),
        ]);

        let host = IsolatedContext::host(vec![PathBuf::from("/host")], loader.clone());
        let a = IsolatedContext::for_bundle(
            PathBuf::from("/plugins/a"),
            vec![PathBuf::from("/plugins/a")],
            host.clone(),
            loader.clone(),
        );
        let b = IsolatedContext::for_bundle(
            PathBuf::from("/plugins/b"),
            vec![PathBuf::from("/plugins/b")],
            host.clone(),
            loader.clone(),
        );

        let mut registry = PluginRegistry::new();
        registry.register(
            PluginDescriptor::new(
                "org.example.MyConnector",
                PluginVersion::new("2"),
                PluginContract::Connector,
                BundleLocation::Path(PathBuf::from("/plugins/a")),
            ),
            a.clone(),
        );
        registry.register(
            PluginDescriptor::new(
                "org.example.MyConnector",
                PluginVersion::new("1"),
                PluginContract::Connector,
                BundleLocation::Path(PathBuf::from("/plugins/b")),
            ),
            b.clone(),
        );
        // Registered but never loadable anywhere: discovery-time scan and
        // run-time resolution disagree.
        registry.register(
            PluginDescriptor::new(
                "org.example.GhostConnector",
                PluginVersion::undefined(),
                PluginContract::Connector,
                BundleLocation::Path(PathBuf::from("/plugins/b")),
            ),
            b.clone(),
        );

        let aliases = AliasIndex::build(&registry);
        let active = vec![
            (BundleLocation::Path(PathBuf::from("/plugins/a")), a),
            (BundleLocation::Path(PathBuf::from("/plugins/b")), b),
        ];
        Fixture {
            resolver: DelegatingResolver::new(host, registry, aliases, active, policy),
        }
    }

    #[test]
    fn registered_name_routes_to_the_active_descriptors_context() {
        let f = fixture(IsolationPolicy::default());
        let resolution = f.resolver.resolve("org.example.MyConnector").unwrap();
        assert_eq!(
            resolution.context.location(),
            &BundleLocation::Path(PathBuf::from("/plugins/a"))
        );
        assert_eq!(resolution.symbol.qualified_name, "org.example.MyConnector");
    }

    #[test]
    fn alias_routes_to_the_same_context_as_the_qualified_name() {
        let f = fixture(IsolationPolicy::default());
        let by_name = f.resolver.resolve("org.example.MyConnector").unwrap();
        let by_alias = f.resolver.resolve("MyConnector").unwrap();
        assert_eq!(by_alias.context.location(), by_name.context.location());
        // The alias resolves the canonical symbol, not the alias string.
        assert_eq!(by_alias.symbol.qualified_name, "org.example.MyConnector");
    }

    #[test]
    fn exempt_names_always_resolve_via_host_even_when_shadowed() {
        let policy = IsolationPolicy::new().exempt_name("org.example.MyConnector");
        let f = fixture(policy);
        let resolution = f.resolver.resolve("org.example.MyConnector").unwrap();
        assert_eq!(resolution.context.location(), &BundleLocation::Host);
        assert_eq!(resolution.symbol.origin, BundleLocation::Host);
    }

    #[test]
    fn registered_but_unloadable_symbol_is_a_hard_failure() {
        let f = fixture(IsolationPolicy::default());
        let err = f.resolver.resolve("org.example.GhostConnector").unwrap_err();
        assert!(matches!(err, ConveyorError::Unresolvable { .. }));
    }

    #[test]
    fn fallback_scan_takes_the_first_owner_in_discovery_order() {
        let f = fixture(IsolationPolicy::default());
        // Helper is unregistered and owned by both bundles; `/plugins/a`
        // was discovered first.
        let resolution = f.resolver.resolve("org.example.internal.Helper").unwrap();
        assert_eq!(
            resolution.context.location(),
            &BundleLocation::Path(PathBuf::from("/plugins/a"))
        );
    }

    #[test]
    fn host_is_the_final_fallback_and_misses_are_typed() {
        let f = fixture(IsolationPolicy::default());
        let shared = f.resolver.resolve("org.conveyor.Contract").unwrap();
        assert_eq!(shared.context.location(), &BundleLocation::Host);

        let err = f.resolver.resolve("org.example.Unknown").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn context_for_unknown_name_degrades_to_the_engine_itself() {
        let f = fixture(IsolationPolicy::default());
        let context = f.resolver.context_for("org.example.Unknown");
        assert_eq!(context.location(), &BundleLocation::Host);
        // The degraded context still works as a delegation base.
        let symbol = context.resolve_symbol("org.example.internal.Helper").unwrap();
        assert_eq!(
            symbol.origin,
            BundleLocation::Path(PathBuf::from("/plugins/a"))
        );
    }

    #[test]
    fn context_for_known_alias_matches_the_qualified_lookup() {
        let f = fixture(IsolationPolicy::default());
        let by_alias = f.resolver.context_for("MyConnector");
        let by_name = f.resolver.context_for("org.example.MyConnector");
        assert_eq!(by_alias.location(), by_name.location());
        assert_eq!(
            by_alias.location(),
            &BundleLocation::Path(PathBuf::from("/plugins/a"))
        );
    }
}
