// Copyright 2026 Propscout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Propscout library — two-source property-listing meta-search.
//!
//! Queries the 99.co JSON search API and the PropertyGuru HTML search page,
//! normalizes both into the common [`model::Listing`] shape, filters,
//! merges, and sorts by price. This library crate exposes the core modules
//! for integration testing; the `propscout` binary is a thin CLI over them.

pub mod aggregate;
pub mod cli;
pub mod extract;
pub mod http;
pub mod model;
pub mod report;
pub mod sources;
