// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Captured Datasets
//!
//! Loaders for the empirical data the IRD model is calibrated against:
//! - **Nowak**: onset latency distributions (pickle archive)
//! - **Sit**: spatiotemporal and raw response traces (`.npz` archives)
//! - **Reynaud**: spatiotemporal response traces (`.npz` archives)
//! - **Sit colour map**: JSON colour list or captured colour-bar PNG
//!
//! All loaders are read-only and return owned data.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod colormap;
pub mod error;
pub mod nowak;
pub mod traces;

pub use colormap::{colorbar_data, hsv_to_rgb, rgb_to_hsv, Colormap, DEFAULT_CLIP_DIST, SIT_CMAP_NAME};
pub use error::{DatasetError, DatasetResult};
pub use nowak::{
    nowak_distribution, Centering, Histogram, NowakArchive, NowakCondition, NowakDistribution,
    NowakOptions, Points,
};
pub use traces::{
    interpolate, reynaud_spatiotemporal_traces, sit_spatiotemporal_traces, sit_traces,
    ContrastOverlay, SitTraceOptions, REYNAUD_DEFAULT_CONTRAST, SIT_DEFAULT_CONTRAST,
};
