// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Conveyor plugin engine.
//!
//! Discovery-time errors (`Discovery`, `Scan`) are recovered locally by the
//! discovery driver: the broken bundle or type is logged and skipped so one
//! bad bundle never prevents the others from loading. Resolution-time errors
//! (`NotFound`, `Unresolvable`) are surfaced to the caller as typed outcomes;
//! the engine itself never treats them as fatal.

use thiserror::Error;

use crate::types::BundleLocation;

/// The primary error type used across the Conveyor engine and its
/// collaborator traits.
#[derive(Debug, Error)]
pub enum ConveyorError {
    /// A bundle location is unreadable, malformed, or its resources cannot
    /// be enumerated. Non-fatal during discovery: the bundle is skipped.
    #[error("discovery failed for {location}: {source}")]
    Discovery {
        location: BundleLocation,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A scanned type could not be probed (e.g. its version check failed).
    /// Non-fatal: the single type is skipped, the rest of the bundle's scan
    /// results are retained.
    #[error("could not probe plugin type {qualified_name}: {reason}")]
    Scan {
        qualified_name: String,
        reason: String,
    },

    /// A name is unknown to the registry, the alias index, every active
    /// context, and the host context. An expected, frequently-hit outcome.
    #[error("symbol not found: {name}")]
    NotFound { name: String },

    /// The registry claimed ownership of a name but the owning context
    /// cannot actually produce the symbol. Indicates an inconsistency
    /// between discovery-time scanning and run-time resolution; hard
    /// failure, never retried against other contexts.
    #[error("registered symbol {name} is unresolvable in {location}")]
    Unresolvable {
        name: String,
        location: BundleLocation,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid policy TOML, unknown fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConveyorError {
    /// Build a `NotFound` for the given symbol name.
    pub fn not_found(name: impl Into<String>) -> Self {
        ConveyorError::NotFound { name: name.into() }
    }

    /// True if this is the expected resolution-miss outcome, as opposed to
    /// a real failure. The resolver's fallback scan continues past these.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConveyorError::NotFound { .. })
    }
}
