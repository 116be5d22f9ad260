// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # stevens-thesis
//!
//! Spatiotemporal properties of the evoked response in primary visual cortex.
//! This crate re-exports the thesis components:
//!
//! - **`ird`**: IRD latency / PSTH equations, curve sampler, synthetic
//!   spatial profiles, spatiotemporal responses and the Worgotter LGN PSTH
//! - **`config`**: `thesis_configuration.toml` loading with overrides
//! - **`observability`**: logging initialisation and per-crate debug flags
//! - **`datasets`** (feature `datasets`): captured Nowak, Sit and Reynaud data
//! - **`nbinlined`** (feature `nbinlined`): notebook cell inlining for the blog
//!
//! ## Usage
//!
//! ```rust
//! use stevens_thesis::prelude::*;
//!
//! let mut config = ThesisConfig::default();
//! config.synthesis.density = 8;
//! config.synthesis.contrast_multiplier = 100.0;
//!
//! let stack = synthesize(&config.synthesis)?;
//! let summary = StackSummary::new(&stack);
//! assert_eq!(summary.frame_shape, (8, 8));
//! # Ok::<(), stevens_thesis::ird::ModelError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: thesis-config, thesis-observability        │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Model: thesis-ird                                      │
//! │  (equations, curve sampler, synthetic profiles)         │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Data & publishing: thesis-datasets, thesis-nbinlined   │
//! └─────────────────────────────────────────────────────────┘
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use thesis_config as config;
pub use thesis_ird as ird;
pub use thesis_observability as observability;

#[cfg(feature = "datasets")]
pub use thesis_datasets as datasets;

#[cfg(feature = "nbinlined")]
pub use thesis_nbinlined as nbinlined;

pub mod summary;

pub use summary::{synthesize, StackSummary};

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::summary::{synthesize, StackSummary};
    pub use thesis_config::{load_config, validate_config, ThesisConfig};
    pub use thesis_ird::{
        psth_curve, Curve, IrdModel, IrdParameters, ParameterPreset, ProfileSettings, PsthCurveOptions,
        PsthModel, ResponseStack, SpatialPattern, SpatioTemporalResponse, SyntheticProfiles,
    };
    pub use thesis_observability::{init_logging, parse_debug_flags, CrateDebugFlags, LoggingConfig};

    #[cfg(feature = "datasets")]
    pub use thesis_datasets::{Colormap, NowakCondition, NowakOptions, SitTraceOptions};

    #[cfg(feature = "nbinlined")]
    pub use thesis_nbinlined::NotebookInliner;
}
