// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative in-memory plugin fixtures.
//!
//! A [`FixtureSet`] describes a plugin landscape -- bundles, the types they
//! expose, internal helper symbols, injected failures -- and produces fake
//! implementations of all three collaborator traits over it, so discovery
//! and resolution can be exercised end-to-end without touching the
//! filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use conveyor_core::error::ConveyorError;
use conveyor_core::traits::{
    BundleLocator, BundleScanner, ScanFailure, ScanReport, ScannedType, SymbolLoader,
};
use conveyor_core::types::{BundleLocation, PluginContract, SymbolPayload};

/// The fixed resource location of the fixture host namespace.
pub const HOST_DIR: &str = "/host";

/// One fake bundle: a location, the extension-point types it exposes, and
/// the internal helper symbols that live in it without being registered.
#[derive(Debug, Clone, Default)]
pub struct FixtureBundle {
    location: PathBuf,
    types: Vec<ScannedType>,
    failures: Vec<ScanFailure>,
    helpers: Vec<String>,
    phantoms: Vec<String>,
    unreadable: bool,
}

impl FixtureBundle {
    pub fn at(location: impl Into<PathBuf>) -> Self {
        FixtureBundle {
            location: location.into(),
            ..FixtureBundle::default()
        }
    }

    /// Expose an extension-point implementation with a version string.
    pub fn with_type(
        mut self,
        qualified_name: impl Into<String>,
        contract: PluginContract,
        version: impl Into<String>,
    ) -> Self {
        self.types.push(ScannedType {
            qualified_name: qualified_name.into(),
            contract,
            version: Some(version.into()),
        });
        self
    }

    /// Expose an implementation whose version probe yields nothing.
    pub fn with_unversioned_type(
        mut self,
        qualified_name: impl Into<String>,
        contract: PluginContract,
    ) -> Self {
        self.types.push(ScannedType {
            qualified_name: qualified_name.into(),
            contract,
            version: None,
        });
        self
    }

    /// An internal symbol resolvable from this bundle but never registered.
    pub fn with_helper(mut self, qualified_name: impl Into<String>) -> Self {
        self.helpers.push(qualified_name.into());
        self
    }

    /// A type the scanner reports but the loader can never materialize:
    /// discovery-time scanning and run-time resolution disagree.
    pub fn with_phantom_type(
        mut self,
        qualified_name: impl Into<String>,
        contract: PluginContract,
        version: impl Into<String>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        self.phantoms.push(qualified_name.clone());
        self.types.push(ScannedType {
            qualified_name,
            contract,
            version: Some(version.into()),
        });
        self
    }

    /// Inject a per-type probe failure into the scan report.
    pub fn with_probe_failure(
        mut self,
        qualified_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.failures.push(ScanFailure {
            qualified_name: qualified_name.into(),
            reason: reason.into(),
        });
        self
    }

    /// Make this bundle's resources unenumerable (a discovery I/O error).
    pub fn unreadable(mut self) -> Self {
        self.unreadable = true;
        self
    }

    fn resources(&self) -> Vec<PathBuf> {
        vec![self.location.join("lib")]
    }

    fn owns_symbol(&self, name: &str) -> bool {
        if self.phantoms.iter().any(|p| p == name) {
            return false;
        }
        self.helpers.iter().any(|h| h == name)
            || self.types.iter().any(|t| t.qualified_name == name)
    }
}

/// A whole fake plugin landscape under one root.
#[derive(Debug, Default)]
pub struct FixtureSet {
    root: PathBuf,
    bundles: Vec<FixtureBundle>,
    unreadable_roots: Vec<PathBuf>,
    host_types: Vec<ScannedType>,
    host_symbols: Vec<String>,
}

impl FixtureSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FixtureSet {
            root: root.into(),
            ..FixtureSet::default()
        }
    }

    pub fn with_bundle(mut self, bundle: FixtureBundle) -> Self {
        self.bundles.push(bundle);
        self
    }

    /// Mark an entire root directory as unenumerable.
    pub fn with_unreadable_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.unreadable_roots.push(root.into());
        self
    }

    /// A host-shipped extension-point implementation.
    pub fn with_host_type(
        mut self,
        qualified_name: impl Into<String>,
        contract: PluginContract,
        version: impl Into<String>,
    ) -> Self {
        self.host_types.push(ScannedType {
            qualified_name: qualified_name.into(),
            contract,
            version: Some(version.into()),
        });
        self
    }

    /// A plain host symbol (e.g. a shared contract type).
    pub fn with_host_symbol(mut self, qualified_name: impl Into<String>) -> Self {
        self.host_symbols.push(qualified_name.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The host resource locations to hand to discovery.
    pub fn host_resources(&self) -> Vec<PathBuf> {
        vec![PathBuf::from(HOST_DIR)]
    }

    /// Build the three collaborator fakes sharing this fixture set.
    pub fn fakes(self) -> Fakes {
        let set = Arc::new(self);
        Fakes {
            locator: Arc::new(FixtureLocator { set: set.clone() }),
            scanner: Arc::new(FixtureScanner { set: set.clone() }),
            loader: Arc::new(FixtureLoader {
                set,
                loads: Mutex::new(HashMap::new()),
            }),
        }
    }

    fn bundle_at(&self, location: &Path) -> Option<&FixtureBundle> {
        self.bundles.iter().find(|b| b.location == location)
    }

    fn bundle_for_resources(&self, locations: &[PathBuf]) -> Option<&FixtureBundle> {
        let first = locations.first()?;
        self.bundles.iter().find(|b| &b.resources()[0] == first)
    }

    fn is_host_resources(&self, locations: &[PathBuf]) -> bool {
        locations.first().is_some_and(|l| l == Path::new(HOST_DIR))
    }

    fn owns_host_symbol(&self, name: &str) -> bool {
        self.host_symbols.iter().any(|s| s == name)
            || self.host_types.iter().any(|t| t.qualified_name == name)
    }
}

/// The three collaborator fakes over one shared [`FixtureSet`].
pub struct Fakes {
    pub locator: Arc<FixtureLocator>,
    pub scanner: Arc<FixtureScanner>,
    pub loader: Arc<FixtureLoader>,
}

/// Fake bundle enumerator: deterministic, idempotent, insertion-ordered.
pub struct FixtureLocator {
    set: Arc<FixtureSet>,
}

impl BundleLocator for FixtureLocator {
    fn bundle_locations(&self, root: &Path) -> Result<Vec<PathBuf>, ConveyorError> {
        if self.set.unreadable_roots.iter().any(|r| r == root) {
            return Err(ConveyorError::Discovery {
                location: BundleLocation::Path(root.to_path_buf()),
                source: Box::new(std::io::Error::other("unreadable root")),
            });
        }
        Ok(self
            .set
            .bundles
            .iter()
            .filter(|b| b.location.starts_with(root))
            .map(|b| b.location.clone())
            .collect())
    }

    fn bundle_resources(&self, location: &Path) -> Result<Vec<PathBuf>, ConveyorError> {
        let bundle = self.set.bundle_at(location).ok_or_else(|| ConveyorError::Discovery {
            location: BundleLocation::Path(location.to_path_buf()),
            source: Box::new(std::io::Error::other("unknown bundle location")),
        })?;
        if bundle.unreadable {
            return Err(ConveyorError::Discovery {
                location: BundleLocation::Path(location.to_path_buf()),
                source: Box::new(std::io::Error::other("unreadable bundle")),
            });
        }
        Ok(bundle.resources())
    }
}

/// Fake scanner reporting the fixture's declared types and probe failures.
pub struct FixtureScanner {
    set: Arc<FixtureSet>,
}

impl BundleScanner for FixtureScanner {
    fn scan(&self, locations: &[PathBuf]) -> Result<ScanReport, ConveyorError> {
        if self.set.is_host_resources(locations) {
            return Ok(ScanReport {
                types: self.set.host_types.clone(),
                failures: Vec::new(),
            });
        }
        Ok(match self.set.bundle_for_resources(locations) {
            Some(bundle) => ScanReport {
                types: bundle.types.clone(),
                failures: bundle.failures.clone(),
            },
            None => ScanReport::default(),
        })
    }
}

/// Fake symbol loader: a symbol loads from a location iff the fixture
/// declares it there. Records per-name load counts.
pub struct FixtureLoader {
    set: Arc<FixtureSet>,
    loads: Mutex<HashMap<String, usize>>,
}

impl FixtureLoader {
    /// How many times `name` was actually probed (cache misses only).
    pub fn load_count(&self, name: &str) -> usize {
        self.loads
            .lock()
            .expect("load counter poisoned")
            .get(name)
            .copied()
            .unwrap_or(0)
    }
}

impl SymbolLoader for FixtureLoader {
    fn load(
        &self,
        locations: &[PathBuf],
        name: &str,
    ) -> Result<Option<SymbolPayload>, ConveyorError> {
        *self
            .loads
            .lock()
            .expect("load counter poisoned")
            .entry(name.to_string())
            .or_insert(0) += 1;

        let owned = if self.set.is_host_resources(locations) {
            self.set.owns_host_symbol(name)
        } else {
            self.set
                .bundle_for_resources(locations)
                .is_some_and(|b| b.owns_symbol(name))
        };
        Ok(owned.then(|| Arc::new(name.to_string()) as SymbolPayload))
    }
}
