// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Isolation exemption policy.
//!
//! Some symbols must always be shared rather than isolated: typically the
//! extension-point contracts themselves and any host framework types they
//! transitively require. The policy is global -- it is consulted before
//! any registry lookup -- and is part of the embedding layer's
//! configuration, so the model deserializes from TOML with
//! `deny_unknown_fields` like the rest of the config surface.

use serde::{Deserialize, Serialize};

/// Predicate deciding which symbol names are exempt from isolation and
/// always resolve through the host context.
///
/// The default policy exempts nothing: every name goes through the
/// registry and fallback chain unless the embedder says otherwise.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IsolationPolicy {
    /// Exact qualified names that always resolve through the host.
    pub exempt_names: Vec<String>,

    /// Name prefixes (e.g. `org.conveyor.`) that always resolve through
    /// the host.
    pub exempt_prefixes: Vec<String>,
}

impl IsolationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact exempt name.
    pub fn exempt_name(mut self, name: impl Into<String>) -> Self {
        self.exempt_names.push(name.into());
        self
    }

    /// Add an exempt prefix.
    pub fn exempt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.exempt_prefixes.push(prefix.into());
        self
    }

    /// True if `name` must bypass isolation and resolve through the host,
    /// regardless of what any bundle declares.
    pub fn is_exempt(&self, name: &str) -> bool {
        self.exempt_names.iter().any(|n| n == name)
            || self.exempt_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}
