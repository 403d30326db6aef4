// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Conveyor engine and its collaborator traits.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The fixed extension-point contracts this engine discovers
/// implementations for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
pub enum PluginContract {
    Connector,
    Converter,
    Transform,
}

impl PluginContract {
    /// All contracts, in the order they are reported.
    pub const ALL: [PluginContract; 3] = [
        PluginContract::Connector,
        PluginContract::Converter,
        PluginContract::Transform,
    ];

    /// The conventional type-name suffix stripped when computing a pruned
    /// alias (e.g. `FileStreamConnector` prunes to `FileStream`).
    pub fn alias_suffix(&self) -> &'static str {
        match self {
            PluginContract::Connector => "Connector",
            PluginContract::Converter => "Converter",
            PluginContract::Transform => "Transform",
        }
    }
}

/// Identity of a resolution namespace: either the host/system namespace or
/// a discovered plugin bundle location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BundleLocation {
    /// The engine's own namespace; parent of every bundle context.
    Host,
    /// A discovered bundle directory or archive.
    Path(PathBuf),
}

impl fmt::Display for BundleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleLocation::Host => write!(f, "host"),
            BundleLocation::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Ordering key for a plugin version string.
///
/// Derived `Ord` on the enum makes the order total and transitive by
/// construction: all `Raw` values sort below all `Semver` values, raw
/// strings compare bytewise among themselves, and parsed versions compare
/// per semver precedence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum VersionKey {
    /// Did not parse as strict semver (including the `"undefined"` marker).
    Raw(String),
    /// Parsed as strict semver; ranks above any raw string.
    Semver(semver::Version),
}

/// A plugin version string with a documented total order.
///
/// Versions that parse as strict [`semver::Version`] are ordered
/// semantically and rank above any non-semver string; non-semver strings
/// (including `"undefined"`) are ordered bytewise-lexicographically among
/// themselves. Equality follows the same key. The original raw string is
/// preserved for display.
#[derive(Debug, Clone)]
pub struct PluginVersion {
    raw: String,
    key: VersionKey,
}

impl PluginVersion {
    /// The version reported for types that do not expose one.
    pub const UNDEFINED: &'static str = "undefined";

    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let key = match semver::Version::parse(&raw) {
            Ok(version) => VersionKey::Semver(version),
            Err(_) => VersionKey::Raw(raw.clone()),
        };
        PluginVersion { raw, key }
    }

    /// The placeholder version for types with no version information.
    pub fn undefined() -> Self {
        PluginVersion::new(Self::UNDEFINED)
    }

    /// The raw version string as reported by the scanner.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True if this version parsed as strict semver.
    pub fn is_semver(&self) -> bool {
        matches!(self.key, VersionKey::Semver(_))
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for PluginVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PluginVersion {}

impl PartialOrd for PluginVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PluginVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Opaque payload produced by a [`SymbolLoader`](crate::traits::SymbolLoader)
/// when it materializes a symbol. The engine never inspects it; the
/// instantiation layer above downcasts it.
pub type SymbolPayload = Arc<dyn Any + Send + Sync>;

/// A resolved symbol: the unit a namespace produces.
///
/// Cheap to clone; contexts cache these per name.
#[derive(Clone)]
pub struct Symbol {
    /// Dot-separated qualified name (e.g. `org.example.MyConnector`).
    pub qualified_name: String,
    /// The namespace that actually loaded the symbol.
    pub origin: BundleLocation,
    /// Whatever the symbol loader materialized.
    pub payload: SymbolPayload,
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("qualified_name", &self.qualified_name)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
