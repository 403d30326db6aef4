// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symbol materialization seam.

use std::path::PathBuf;

use crate::error::ConveyorError;
use crate::types::SymbolPayload;

/// Materializes a single symbol from a set of resource locations.
///
/// Contexts call this lazily, once per name, and cache the result. The
/// loader must only consult the locations it is given -- namespace
/// delegation is the context's job, not the loader's.
pub trait SymbolLoader: Send + Sync {
    /// Probe `locations` for `name`.
    ///
    /// `Ok(None)` means the symbol is simply not present in these locations;
    /// this is a frequent, expected outcome used by delegation and the
    /// resolver's fallback scan. `Err` is reserved for real I/O or
    /// materialization failures.
    fn load(
        &self,
        locations: &[PathBuf],
        name: &str,
    ) -> Result<Option<SymbolPayload>, ConveyorError>;
}
