// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the Conveyor plugin engine.
//!
//! Bundle enumeration, bundle scanning, and symbol materialization are
//! external collaborators: the engine consumes them through these narrow
//! seams and never implements them itself. [`LoadContext`] is the
//! resolution contract implemented by every namespace the engine hands out.

pub mod context;
pub mod loader;
pub mod locator;
pub mod scanner;

// Re-export all traits at the traits module level for convenience.
pub use context::LoadContext;
pub use loader::SymbolLoader;
pub use locator::BundleLocator;
pub use scanner::{BundleScanner, ScanFailure, ScanReport, ScannedType};
