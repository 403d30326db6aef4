// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Isolated load contexts: the unit of namespace isolation.
//!
//! Each discovered bundle gets its own context that resolves symbols from
//! the bundle's own resource locations first and otherwise delegates to
//! its parent (the host context) -- never to a sibling. Isolation here is
//! namespace separation, not a security boundary.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::trace;

use conveyor_core::error::ConveyorError;
use conveyor_core::traits::{LoadContext, SymbolLoader};
use conveyor_core::types::{BundleLocation, Symbol};

/// One resolution namespace: a bundle's (or the host's) owned resource
/// locations, a parent to delegate to, and a lazy per-name symbol cache.
///
/// Nothing is materialized at construction; each name is loaded on first
/// resolution and cached. The cache gives at-most-once publication per
/// name with locking scoped to the name's shard, so concurrent resolution
/// through one context is safe.
pub struct IsolatedContext {
    location: BundleLocation,
    resources: Vec<PathBuf>,
    parent: Option<Arc<IsolatedContext>>,
    loader: Arc<dyn SymbolLoader>,
    cache: DashMap<String, Symbol>,
}

impl IsolatedContext {
    /// The host/system namespace: root of every delegation chain.
    pub fn host(resources: Vec<PathBuf>, loader: Arc<dyn SymbolLoader>) -> Arc<Self> {
        Arc::new(IsolatedContext {
            location: BundleLocation::Host,
            resources,
            parent: None,
            loader,
            cache: DashMap::new(),
        })
    }

    /// A namespace for one discovered bundle, delegating to `parent` for
    /// anything its own locations do not provide.
    pub fn for_bundle(
        location: PathBuf,
        resources: Vec<PathBuf>,
        parent: Arc<IsolatedContext>,
        loader: Arc<dyn SymbolLoader>,
    ) -> Arc<Self> {
        Arc::new(IsolatedContext {
            location: BundleLocation::Path(location),
            resources,
            parent: Some(parent),
            loader,
            cache: DashMap::new(),
        })
    }

    pub fn parent(&self) -> Option<&Arc<IsolatedContext>> {
        self.parent.as_ref()
    }

    /// Resolve `name` against this context's own locations only, without
    /// delegating to the parent. `Ok(None)` means not owned here.
    pub fn resolve_local(&self, name: &str) -> Result<Option<Symbol>, ConveyorError> {
        match self.cache.entry(name.to_string()) {
            Entry::Occupied(hit) => {
                trace!(symbol = name, context = %self.location, "symbol cache hit");
                Ok(Some(hit.get().clone()))
            }
            Entry::Vacant(slot) => match self.loader.load(&self.resources, name)? {
                Some(payload) => {
                    let symbol = Symbol {
                        qualified_name: name.to_string(),
                        origin: self.location.clone(),
                        payload,
                    };
                    slot.insert(symbol.clone());
                    trace!(symbol = name, context = %self.location, "symbol loaded");
                    Ok(Some(symbol))
                }
                None => Ok(None),
            },
        }
    }
}

impl LoadContext for IsolatedContext {
    /// Own locations first, then the parent chain. Siblings are never
    /// consulted. A miss everywhere is the expected `NotFound` outcome.
    fn resolve_symbol(&self, name: &str) -> Result<Symbol, ConveyorError> {
        if let Some(symbol) = self.resolve_local(name)? {
            return Ok(symbol);
        }
        match &self.parent {
            Some(parent) => parent.resolve_symbol(name),
            None => Err(ConveyorError::not_found(name)),
        }
    }

    fn location(&self) -> &BundleLocation {
        &self.location
    }
}
