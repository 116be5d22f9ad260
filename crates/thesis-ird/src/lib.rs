// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Invariant Response Description (IRD) Model
//!
//! Parametric model of V1 response latency and temporal dynamics from
//! Albrecht et al., and a spatial synthesizer built on top of it:
//! - **Equations**: Naka-Rushton contrast response, inverted Naka-Rushton
//!   latency (V1 and LGN), dual-Gaussian PSTH
//! - **Curve sampler**: PSTH over a time range with normalization and lag clipping
//! - **Synthetic profiles**: per-pixel PSTHs over a spatial pattern, producing a
//!   time-indexed stack of response images
//! - **Spatiotemporal response**: stacked curves as a position x duration image
//! - **Worgotter PSTH**: spline reproduction of a published LGN PSTH
//!
//! ## Usage
//!
//! ```rust
//! use thesis_ird::{ProfileSettings, SyntheticProfiles};
//!
//! let settings = ProfileSettings {
//!     density: 10,
//!     contrast_multiplier: 100.0,
//!     ..ProfileSettings::default()
//! };
//! let stack = SyntheticProfiles::new(settings).synthesize()?;
//! assert_eq!(stack.frame_shape(), (10, 10));
//! # Ok::<(), thesis_ird::ModelError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod curve;
pub mod equations;
pub mod error;
pub mod model;
pub mod parameters;
pub mod pattern;
pub mod profiles;
pub mod spatiotemporal;
pub mod worgotter;

pub use curve::{psth_curve, psth_samples, sample_times, Curve, PsthCurveOptions};
pub use equations::{latency_lgn, latency_v1, naka_rushton, v1_psth, LgnLatency};
pub use error::{ModelError, ModelResult};
pub use model::{IrdModel, PsthModel, SampleOptions};
pub use parameters::{IrdParameters, ParameterPreset};
pub use pattern::{
    ArrayPattern, ConstantPattern, GaussianPattern, PatternSpec, SheetBounds, SheetImage,
    SpatialPattern,
};
pub use profiles::{BaselineMode, LagMode, ProfileSettings, ResponseStack, SyntheticProfiles};
pub use spatiotemporal::SpatioTemporalResponse;
pub use worgotter::{PathCode, Spline, WorgotterPsth};
