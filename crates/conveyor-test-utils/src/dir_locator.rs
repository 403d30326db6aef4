// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A real-filesystem bundle locator for tests.
//!
//! Treats every immediate subdirectory of a plugin root as one bundle and
//! every file inside a bundle as one of its resources. Listings are
//! sorted, satisfying the determinism and idempotence the locator seam
//! requires.

use std::path::{Path, PathBuf};

use conveyor_core::error::ConveyorError;
use conveyor_core::traits::BundleLocator;
use conveyor_core::types::BundleLocation;

/// Directory-per-bundle locator over a real filesystem tree.
#[derive(Debug, Default)]
pub struct DirectoryLocator;

fn io_error(path: &Path, err: std::io::Error) -> ConveyorError {
    ConveyorError::Discovery {
        location: BundleLocation::Path(path.to_path_buf()),
        source: Box::new(err),
    }
}

fn sorted_entries(path: &Path) -> Result<Vec<PathBuf>, ConveyorError> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(path).map_err(|e| io_error(path, e))? {
        entries.push(entry.map_err(|e| io_error(path, e))?.path());
    }
    entries.sort();
    Ok(entries)
}

impl BundleLocator for DirectoryLocator {
    fn bundle_locations(&self, root: &Path) -> Result<Vec<PathBuf>, ConveyorError> {
        Ok(sorted_entries(root)?
            .into_iter()
            .filter(|p| p.is_dir())
            .collect())
    }

    fn bundle_resources(&self, location: &Path) -> Result<Vec<PathBuf>, ConveyorError> {
        Ok(sorted_entries(location)?
            .into_iter()
            .filter(|p| p.is_file())
            .collect())
    }
}
