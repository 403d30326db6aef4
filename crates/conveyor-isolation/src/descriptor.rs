// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable descriptor for one discovered extension-point implementation.

use std::fmt;

use conveyor_core::types::{BundleLocation, PluginContract, PluginVersion};

/// One discovered implementation: qualified name, version, contract, and
/// the identity of the owning namespace. Immutable once created.
///
/// The derived total order is field order: qualified name first, then
/// version (per [`PluginVersion`]'s documented order), then owning
/// location as the stable tie-break when two bundles ship the identical
/// name and version, then contract. Whenever several bundles register a
/// type under the same qualified name, the *maximal* descriptor under this
/// order is the active one -- deterministically, across runs, because
/// every component of the key is derived from bundle content and location,
/// never from discovery timing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PluginDescriptor {
    qualified_name: String,
    version: PluginVersion,
    location: BundleLocation,
    contract: PluginContract,
}

impl PluginDescriptor {
    pub fn new(
        qualified_name: impl Into<String>,
        version: PluginVersion,
        contract: PluginContract,
        location: BundleLocation,
    ) -> Self {
        PluginDescriptor {
            qualified_name: qualified_name.into(),
            version,
            location,
            contract,
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn version(&self) -> &PluginVersion {
        &self.version
    }

    pub fn contract(&self) -> PluginContract {
        self.contract
    }

    /// Identity of the owning namespace. A reference to identity only: the
    /// descriptor does not own the context's lifetime.
    pub fn location(&self) -> &BundleLocation {
        &self.location
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) @ {}",
            self.qualified_name, self.version, self.location
        )
    }
}
