// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synthetic Spatial Profiles
//!
//! A fast and crude approximation to the afferent activity arriving in V1.
//! Every pixel of a spatial pattern is treated as a local contrast; the IRD
//! curve sampler is evaluated per pixel and the resulting time series are
//! scattered into a stack of images, one per time step.
//!
//! ```text
//! pattern (rows x cols) ──► per pixel: contrast, radius, lag
//!                              │
//!                              ▼
//!                      PSTH curve (onset..=offset)
//!                              │ + baseline, lag zeroing, peak multiplier
//!                              ▼
//!               ResponseStack (time x rows x cols)
//! ```

use ndarray::{Array2, Array3, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

use crate::curve::{psth_samples, sample_times, Curve, PsthCurveOptions};
use crate::error::{ModelError, ModelResult};
use crate::model::{active_lock, IrdModel, PsthModel};
use crate::parameters::IrdParameters;
use crate::pattern::{PatternSpec, SheetBounds, SpatialPattern};

/// How the causal lag of each pixel is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LagMode {
    /// Fixed lag given by `ProfileSettings::lag`
    #[default]
    Explicit,
    /// LGN latency of the local contrast
    Variable,
    /// LGN latency of the global contrast multiplier
    Constant,
}

/// Reference used to size the tonic baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineMode {
    /// Percentage of the contrast multiplier
    Global,
    /// Percentage of the pixel's own peak
    #[default]
    Local,
}

/// Configuration of the synthesizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    /// Spatial sampling density for both axes
    pub density: usize,

    /// Multiplier converting pattern values to model contrast. Ignored for
    /// the response when `tauc_lock` is set.
    pub contrast_multiplier: f64,

    /// Scale each pixel's peak to the pattern value at that pixel
    pub peak_scaling: bool,

    pub peak_multiplier: f64,
    pub onset: i64,
    pub offset: i64,
    pub timestep: usize,
    pub lag_mode: LagMode,

    /// Absolute lag (ms) for activity to reach V1; only valid in explicit mode
    pub lag: f64,

    /// Translational shift of the IRD response
    pub shift: f64,

    pub parameters: IrdParameters,

    /// Multiplier from sheet coordinates to IRD radius
    pub spatial_scale: f64,

    /// Tonic response (percent) added after the lag
    pub baseline: f64,
    pub baseline_mode: BaselineMode,

    pub value_dimension: String,

    /// Contrast locked for latency computation; requires peak scaling
    pub tauc_lock: Option<f64>,

    pub pattern: PatternSpec,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            density: 30,
            contrast_multiplier: 0.0,
            peak_scaling: false,
            peak_multiplier: 1.0,
            onset: 0,
            offset: 200,
            timestep: 1,
            lag_mode: LagMode::Explicit,
            lag: 0.0,
            shift: 0.0,
            parameters: IrdParameters::MEANS,
            spatial_scale: 1.0,
            baseline: 0.0,
            baseline_mode: BaselineMode::Local,
            value_dimension: "Response".to_string(),
            tauc_lock: None,
            pattern: PatternSpec::default(),
        }
    }
}

impl ProfileSettings {
    /// Check option combinations that the synthesizer refuses to run with
    pub fn validate(&self) -> ModelResult<()> {
        let locked = active_lock(self.tauc_lock).is_some();
        if locked && !self.peak_scaling {
            return Err(ModelError::InvalidConfiguration(
                "The tauc_lock option must be used with peak_scaling=true".to_string(),
            ));
        }
        if !locked && self.peak_scaling {
            return Err(ModelError::InvalidConfiguration(
                "If tauc_lock is disabled use peak_scaling=false".to_string(),
            ));
        }
        if self.lag_mode != LagMode::Explicit && self.lag != 0.0 {
            return Err(ModelError::InvalidConfiguration(
                "Non-zero explicit lag may only be used if lag_mode is set to 'explicit'"
                    .to_string(),
            ));
        }
        if self.density == 0 {
            return Err(ModelError::InvalidConfiguration(
                "density must be greater than zero".to_string(),
            ));
        }
        sample_times(self.onset, self.offset, self.timestep)?;
        Ok(())
    }
}

/// Time-indexed stack of response images
///
/// All frames share the shape and bounds of the rendered pattern; times are
/// strictly increasing at a fixed step.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseStack {
    times: Vec<i64>,
    data: Array3<f64>,
    bounds: SheetBounds,
    value_dimension: String,
}

impl ResponseStack {
    pub fn times(&self) -> &[i64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `(rows, cols)` of every frame
    pub fn frame_shape(&self) -> (usize, usize) {
        let (_, rows, cols) = self.data.dim();
        (rows, cols)
    }

    pub fn bounds(&self) -> SheetBounds {
        self.bounds
    }

    pub fn value_dimension(&self) -> &str {
        &self.value_dimension
    }

    /// Full `(time, row, col)` array
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    pub fn frame(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        (index < self.times.len()).then(|| self.data.index_axis(Axis(0), index))
    }

    pub fn frame_at(&self, time: i64) -> Option<ArrayView2<'_, f64>> {
        let index = self.times.binary_search(&time).ok()?;
        self.frame(index)
    }

    pub fn pixel_series(&self, row: usize, col: usize) -> ArrayView1<'_, f64> {
        self.data.slice(ndarray::s![.., row, col])
    }

    /// Time series of one pixel as a curve (`Time` vs value dimension)
    pub fn pixel_curve(&self, row: usize, col: usize) -> Curve {
        let points = self
            .times
            .iter()
            .zip(self.pixel_series(row, col))
            .map(|(t, v)| (*t as f64, *v))
            .collect();
        Curve::new(points)
            .with_label(format!("({}, {})", row, col))
            .with_dimensions("Time", self.value_dimension.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, ArrayView2<'_, f64>)> {
        self.times
            .iter()
            .copied()
            .zip(self.data.axis_iter(Axis(0)))
    }

    /// Mapping from time to owned frame
    pub fn to_map(&self) -> BTreeMap<i64, Array2<f64>> {
        self.iter().map(|(t, frame)| (t, frame.to_owned())).collect()
    }

    /// Largest value across all frames
    pub fn peak(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Configuration-driven synthesizer of spatiotemporal V1 responses
pub struct SyntheticProfiles<'a> {
    settings: ProfileSettings,
    pattern: Option<Box<dyn SpatialPattern + 'a>>,
    tauc_shifter: Option<Box<dyn Fn(f64) -> f64 + 'a>>,
    model: Box<dyn PsthModel + 'a>,
}

impl fmt::Debug for SyntheticProfiles<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntheticProfiles")
            .field("settings", &self.settings)
            .field("custom_pattern", &self.pattern.is_some())
            .field("tauc_shifter", &self.tauc_shifter.is_some())
            .field("model", &self.model.model_name())
            .finish()
    }
}

impl Default for SyntheticProfiles<'_> {
    fn default() -> Self {
        Self::new(ProfileSettings::default())
    }
}

impl<'a> SyntheticProfiles<'a> {
    pub fn new(settings: ProfileSettings) -> Self {
        Self {
            settings,
            pattern: None,
            tauc_shifter: None,
            model: Box::new(IrdModel),
        }
    }

    /// Replace the configured pattern with an arbitrary one
    pub fn with_pattern(mut self, pattern: impl SpatialPattern + 'a) -> Self {
        self.pattern = Some(Box::new(pattern));
        self
    }

    /// Latency offset as a function of model radius
    pub fn with_tauc_shifter(mut self, shifter: impl Fn(f64) -> f64 + 'a) -> Self {
        self.tauc_shifter = Some(Box::new(shifter));
        self
    }

    pub fn with_model(mut self, model: impl PsthModel + 'a) -> Self {
        self.model = Box::new(model);
        self
    }

    pub fn settings(&self) -> &ProfileSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ProfileSettings {
        &mut self.settings
    }

    fn pattern(&self) -> &dyn SpatialPattern {
        match &self.pattern {
            Some(pattern) => pattern.as_ref(),
            None => &self.settings.pattern,
        }
    }

    /// Causal lag of a pixel with local contrast `contrast`
    fn pixel_lag(&self, contrast: f64) -> f64 {
        let s = &self.settings;
        match s.lag_mode {
            LagMode::Explicit => s.lag,
            LagMode::Variable => self.model.latency_lgn(contrast),
            LagMode::Constant => self.model.latency_lgn(s.contrast_multiplier),
        }
    }

    /// Synthesize the response stack
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidConfiguration` for inconsistent settings
    /// and propagates curve sampling errors.
    pub fn synthesize(&self) -> ModelResult<ResponseStack> {
        let s = &self.settings;
        s.validate()?;

        let image = self.pattern().render(s.density);
        let (rows, cols) = image.shape();
        let times = sample_times(s.onset, s.offset, s.timestep)?;
        let lock = active_lock(s.tauc_lock);

        info!(
            "[SYNTHETIC-PROFILES] Synthesizing {}x{} pixels over {} time steps ({} model, lag_mode={:?})",
            rows,
            cols,
            times.len(),
            self.model.model_name(),
            s.lag_mode
        );

        let mut data = Array3::zeros((times.len(), rows, cols));
        let explicit_lag = (s.lag != 0.0).then_some(s.lag);

        for ((row, col), &value) in image.data.indexed_iter() {
            let contrast = value * s.contrast_multiplier;
            let (x, y) = image.matrix_to_sheet(row, col);
            let radius = s.spatial_scale * (x * x + y * y).sqrt();
            let lag = self.pixel_lag(contrast);

            let options = PsthCurveOptions {
                onset: s.onset,
                offset: s.offset,
                timestep: s.timestep,
                normalization: if s.peak_scaling { Some(value) } else { None },
                contrast: lock.unwrap_or(contrast),
                radius,
                parameters: s.parameters,
                shift: s.shift,
                lag: explicit_lag,
                tauc_shifter: self.tauc_shifter.as_deref(),
                tauc_lock: lock,
                label: "IRD_Model",
            };
            // A zero pattern value scales the whole series to zero
            let mut values: Vec<f64> = if s.peak_scaling && value == 0.0 {
                vec![0.0; times.len()]
            } else {
                psth_samples(self.model.as_ref(), &options)?
                    .into_iter()
                    .map(|(_, v)| v)
                    .collect()
            };

            if s.baseline != 0.0 {
                let baseline_factor = match s.baseline_mode {
                    BaselineMode::Global => s.contrast_multiplier,
                    BaselineMode::Local => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                };
                let increment = (s.baseline / 100.0) * baseline_factor;
                for (v, &t) in values.iter_mut().zip(&times) {
                    let t = t as f64;
                    if lag < t && t < s.offset as f64 {
                        *v += increment;
                    }
                }
            }

            for (frame, (v, &t)) in values.iter().zip(&times).enumerate() {
                let out = if t as f64 <= lag {
                    0.0
                } else {
                    v * s.peak_multiplier
                };
                data[[frame, row, col]] = out;
            }

            debug!(
                "[SYNTHETIC-PROFILES] pixel ({}, {}) value={:.4} contrast={:.3} radius={:.3} lag={:.2}",
                row, col, value, contrast, radius, lag
            );
        }

        Ok(ResponseStack {
            times,
            data,
            bounds: image.bounds,
            value_dimension: s.value_dimension.clone(),
        })
    }
}
