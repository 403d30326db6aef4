// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The namespace-resolution contract.

use crate::error::ConveyorError;
use crate::types::{BundleLocation, Symbol};

/// A resolution namespace.
///
/// Implemented by isolated bundle contexts, the host context, and the
/// delegating resolver itself (which makes the resolver usable as a safe
/// delegation base when a caller holds an entirely unknown name).
pub trait LoadContext: Send + Sync {
    /// Resolve a qualified symbol name within this namespace, delegating
    /// per the implementer's chain. A miss is the expected
    /// [`ConveyorError::NotFound`] outcome, not a failure of the context.
    fn resolve_symbol(&self, name: &str) -> Result<Symbol, ConveyorError>;

    /// The identity of this namespace.
    fn location(&self) -> &BundleLocation;
}
