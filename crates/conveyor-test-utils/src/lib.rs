// SPDX-FileCopyrightText: 2026 Conveyor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Conveyor integration tests.
//!
//! Provides in-memory fakes of the collaborator traits for fast,
//! deterministic, CI-runnable tests without real plugin artifacts.
//!
//! # Components
//!
//! - [`FixtureSet`] / [`FixtureBundle`] - declarative plugin landscapes
//!   producing fake locator, scanner, and loader implementations
//! - [`DirectoryLocator`] - a real-filesystem directory-per-bundle locator

pub mod dir_locator;
pub mod fixture;

pub use dir_locator::DirectoryLocator;
pub use fixture::{Fakes, FixtureBundle, FixtureLoader, FixtureLocator, FixtureScanner, FixtureSet};
