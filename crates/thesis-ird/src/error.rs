// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for IRD model evaluation

/// Errors raised while evaluating or configuring the IRD model
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A configuration combination that the synthesizer refuses to run with
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Normalization requested on a curve whose samples are all zero
    #[error("Cannot normalize PSTH samples: maximum sample is {max}")]
    DegenerateNormalization { max: f64 },

    /// Sampling range that yields no time points
    #[error("Invalid sampling range: onset={onset}, offset={offset}, timestep={timestep}")]
    InvalidRange {
        onset: i64,
        offset: i64,
        timestep: usize,
    },

    /// Curves passed to a spatiotemporal response do not share their X samples
    #[error("All curves must share common X sampling (curve {index} differs)")]
    MismatchedSampling { index: usize },

    /// Not enough curves to build a spatiotemporal response
    #[error("At least {required} curves must be supplied, got {actual}")]
    TooFewCurves { required: usize, actual: usize },

    /// Array with an unexpected shape
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;
