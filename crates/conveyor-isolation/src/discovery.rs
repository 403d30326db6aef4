// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The discovery pass: enumerate bundles, scan them, build the registry,
//! derive aliases, freeze the resolver.
//!
//! Discovery runs once, single-writer, before the resolver is exposed to
//! concurrent use. A failure on one bundle is logged and skipped; it must
//! never abort discovery of the others. Only after every bundle (and the
//! host) has been scanned is the alias index built -- alias decisions
//! require full knowledge of every discovered plugin -- and the frozen
//! resolver published.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use conveyor_core::error::ConveyorError;
use conveyor_core::traits::{BundleLocator, BundleScanner, ScanReport, SymbolLoader};
use conveyor_core::types::{BundleLocation, PluginVersion};

use crate::alias::AliasIndex;
use crate::context::IsolatedContext;
use crate::descriptor::PluginDescriptor;
use crate::policy::IsolationPolicy;
use crate::registry::PluginRegistry;
use crate::resolver::DelegatingResolver;

/// Single-use builder for a discovery pass. Consumed by [`run`](Self::run),
/// which publishes the immutable [`DelegatingResolver`].
pub struct PluginDiscovery {
    roots: Vec<PathBuf>,
    host_resources: Vec<PathBuf>,
    locator: Arc<dyn BundleLocator>,
    scanner: Arc<dyn BundleScanner>,
    loader: Arc<dyn SymbolLoader>,
    policy: IsolationPolicy,
}

impl PluginDiscovery {
    pub fn new(
        locator: Arc<dyn BundleLocator>,
        scanner: Arc<dyn BundleScanner>,
        loader: Arc<dyn SymbolLoader>,
    ) -> Self {
        PluginDiscovery {
            roots: Vec::new(),
            host_resources: Vec::new(),
            locator,
            scanner,
            loader,
            policy: IsolationPolicy::default(),
        }
    }

    /// Add a plugin root directory to enumerate.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Resource locations of the host namespace itself. Host locations are
    /// scanned after all bundles so host-shipped implementations
    /// participate in version arbitration.
    pub fn with_host_resources(mut self, resources: Vec<PathBuf>) -> Self {
        self.host_resources = resources;
        self
    }

    pub fn with_policy(mut self, policy: IsolationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the pass and publish the frozen resolver.
    pub fn run(self) -> Arc<DelegatingResolver> {
        let host = IsolatedContext::host(self.host_resources.clone(), self.loader.clone());
        let mut registry = PluginRegistry::new();
        let mut active: Vec<(BundleLocation, Arc<IsolatedContext>)> = Vec::new();

        for root in &self.roots {
            let locations = match self.locator.bundle_locations(root) {
                Ok(locations) => locations,
                Err(err) => {
                    warn!(root = %root.display(), error = %err, "skipping unreadable plugin root");
                    continue;
                }
            };
            for location in locations {
                if let Err(err) =
                    self.discover_bundle(&location, &host, &mut registry, &mut active)
                {
                    warn!(bundle = %location.display(), error = %err, "skipping bundle");
                }
            }
        }

        self.scan_host(&host, &mut registry);

        let aliases = AliasIndex::build(&registry);
        info!(
            plugins = registry.len(),
            bundles = active.len(),
            aliases = aliases.len(),
            "plugin discovery complete"
        );
        DelegatingResolver::new(host, registry, aliases, active, self.policy)
    }

    fn discover_bundle(
        &self,
        location: &Path,
        host: &Arc<IsolatedContext>,
        registry: &mut PluginRegistry,
        active: &mut Vec<(BundleLocation, Arc<IsolatedContext>)>,
    ) -> Result<(), ConveyorError> {
        let resources = self.locator.bundle_resources(location)?;
        info!(bundle = %location.display(), "loading plugin bundle");

        let bundle_location = BundleLocation::Path(location.to_path_buf());
        // Re-discovering the same location reuses its context, keeping the
        // pass idempotent.
        let context = match active.iter().find(|(seen, _)| *seen == bundle_location) {
            Some((_, existing)) => existing.clone(),
            None => IsolatedContext::for_bundle(
                location.to_path_buf(),
                resources.clone(),
                host.clone(),
                self.loader.clone(),
            ),
        };

        let report = self.scanner.scan(&resources)?;
        log_scan_failures(&report);
        if report.is_empty() {
            debug!(bundle = %location.display(), "no extension-point implementations, bundle not retained");
            return Ok(());
        }

        if !active.iter().any(|(seen, _)| *seen == bundle_location) {
            active.push((bundle_location.clone(), context.clone()));
        }
        register_report(registry, report, bundle_location, &context);
        Ok(())
    }

    /// Scan the host namespace last, mirroring bundle scanning. The host
    /// never enters the active-contexts table.
    fn scan_host(&self, host: &Arc<IsolatedContext>, registry: &mut PluginRegistry) {
        match self.scanner.scan(&self.host_resources) {
            Ok(report) => {
                log_scan_failures(&report);
                register_report(registry, report, BundleLocation::Host, host);
            }
            Err(err) => {
                warn!(error = %err, "skipping host namespace scan");
            }
        }
    }
}

fn log_scan_failures(report: &ScanReport) {
    for failure in &report.failures {
        warn!(
            plugin = %failure.qualified_name,
            reason = %failure.reason,
            "could not probe plugin type, skipped"
        );
    }
}

fn register_report(
    registry: &mut PluginRegistry,
    report: ScanReport,
    location: BundleLocation,
    context: &Arc<IsolatedContext>,
) {
    for scanned in report.types {
        let version = scanned
            .version
            .map(PluginVersion::new)
            .unwrap_or_else(PluginVersion::undefined);
        registry.register(
            PluginDescriptor::new(
                scanned.qualified_name,
                version,
                scanned.contract,
                location.clone(),
            ),
            context.clone(),
        );
    }
}
