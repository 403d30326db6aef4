// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bundle content scanning seam.

use std::path::PathBuf;

use crate::error::ConveyorError;
use crate::types::PluginContract;

/// One concrete extension-point implementation found by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedType {
    /// Dot-separated qualified name of the implementing type.
    pub qualified_name: String,
    /// The contract it implements.
    pub contract: PluginContract,
    /// Best-effort version string; `None` when the type exposes none.
    pub version: Option<String>,
}

/// A type the scanner found but could not probe (e.g. its version check
/// failed during construction). The driver logs these and keeps the rest
/// of the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub qualified_name: String,
    pub reason: String,
}

/// The outcome of scanning one bundle's resource locations.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Successfully probed implementations, across all contracts.
    pub types: Vec<ScannedType>,
    /// Types skipped because probing them failed.
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// True if the scan found no extension-point implementations at all.
    /// Such bundles are not retained in the active-contexts table.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Introspects a set of resource locations for concrete implementations of
/// the extension-point contracts.
///
/// Declared external: the engine consumes the report as plugin descriptors
/// and never reimplements type scanning itself.
pub trait BundleScanner: Send + Sync {
    fn scan(&self, locations: &[PathBuf]) -> Result<ScanReport, ConveyorError>;
}
