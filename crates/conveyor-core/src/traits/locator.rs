// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bundle enumeration seam.

use std::path::{Path, PathBuf};

use crate::error::ConveyorError;

/// Enumerates candidate plugin bundles under configured root directories
/// and expands each bundle to its loadable artifact paths.
///
/// Implementations must be deterministic and idempotent: the same root
/// yields the same locations in the same order on every call, which is
/// what keeps discovery order (and with it the resolver's fallback scan
/// order) stable across runs.
pub trait BundleLocator: Send + Sync {
    /// Candidate bundle locations (directories or archives) under `root`.
    fn bundle_locations(&self, root: &Path) -> Result<Vec<PathBuf>, ConveyorError>;

    /// The resource paths needed to construct the isolated context for one
    /// bundle location.
    fn bundle_resources(&self, location: &Path) -> Result<Vec<PathBuf>, ConveyorError>;
}
