// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin isolation and resolution engine.
//!
//! Discovers implementations of the fixed extension-point contracts
//! (connector, converter, transform) from independently deployed plugin
//! bundles, loads each bundle into its own isolated namespace so
//! conflicting dependency versions across bundles cannot collide, and
//! exposes a deterministic `resolve(name) -> context` lookup.
//!
//! The flow: a [`PluginDiscovery`] pass enumerates bundle locations (via
//! the injected [`BundleLocator`](conveyor_core::BundleLocator)), creates
//! an [`IsolatedContext`] per bundle, absorbs the injected
//! [`BundleScanner`](conveyor_core::BundleScanner)'s findings into the
//! [`PluginRegistry`], builds the [`AliasIndex`] once over the final
//! registry, and publishes the frozen [`DelegatingResolver`] for
//! concurrent lock-free lookups.

pub mod alias;
pub mod context;
pub mod descriptor;
pub mod discovery;
pub mod policy;
pub mod registry;
pub mod resolver;

// Re-export key items at crate root for ergonomic imports.
pub use alias::{pruned_name, simple_name, AliasIndex};
pub use context::IsolatedContext;
pub use descriptor::PluginDescriptor;
pub use discovery::PluginDiscovery;
pub use policy::IsolationPolicy;
pub use registry::PluginRegistry;
pub use resolver::{DelegatingResolver, Resolution};
