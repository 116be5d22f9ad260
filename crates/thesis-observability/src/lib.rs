// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # thesis-observability
//!
//! Logging infrastructure for the thesis crates with per-crate debug flag
//! support.
//!
//! ## Features
//! - `file-logging`: per-run JSON log files with daily rotation and retention

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known thesis crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "stevens-thesis",
    "thesis-config",
    "thesis-ird",
    "thesis-datasets",
    "thesis-nbinlined",
];
