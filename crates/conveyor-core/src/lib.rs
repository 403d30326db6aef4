// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Conveyor plugin engine.
//!
//! This crate provides the error taxonomy, common types, and the
//! collaborator traits consumed by the isolation engine in
//! `conveyor-isolation`. Bundle enumeration, type scanning, and symbol
//! materialization are injected through the traits defined here; the
//! engine never implements them itself.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ConveyorError;
pub use types::{BundleLocation, PluginContract, PluginVersion, Symbol, SymbolPayload};

// Re-export all collaborator traits at crate root.
pub use traits::{
    BundleLocator, BundleScanner, LoadContext, ScanFailure, ScanReport, ScannedType, SymbolLoader,
};
