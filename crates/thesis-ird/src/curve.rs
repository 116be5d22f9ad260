// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! PSTH curve sampling
//!
//! Evaluates the IRD sample equation at every integer time step of a range,
//! with optional peak normalization and causal lag clipping.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, ModelResult};
use crate::model::{PsthModel, SampleOptions};
use crate::parameters::IrdParameters;

/// A labelled series of `(x, y)` samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub label: String,
    pub key_dimension: String,
    pub value_dimension: String,
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self {
            label: String::new(),
            key_dimension: "x".to_string(),
            value_dimension: "y".to_string(),
            points,
        }
    }

    /// Build a curve from an `(N, 2)` array of `[x, y]` rows
    pub fn from_array(data: ArrayView2<'_, f64>) -> ModelResult<Self> {
        if data.ncols() != 2 {
            return Err(ModelError::ShapeMismatch {
                expected: "(N, 2)".to_string(),
                actual: format!("{:?}", data.shape()),
            });
        }
        let points = data
            .axis_iter(Axis(0))
            .map(|row| (row[0], row[1]))
            .collect();
        Ok(Self::new(points))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_dimensions(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_dimension = key.into();
        self.value_dimension = value.into();
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Array1<f64> {
        self.points.iter().map(|(x, _)| *x).collect()
    }

    pub fn ys(&self) -> Array1<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }

    /// Samples as an `(N, 2)` array
    pub fn to_array(&self) -> Array2<f64> {
        let mut data = Array2::zeros((self.points.len(), 2));
        for (mut row, (x, y)) in data.axis_iter_mut(Axis(0)).zip(&self.points) {
            row[0] = *x;
            row[1] = *y;
        }
        data
    }

    /// Largest y value, `None` for an empty curve
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|(_, y)| *y).reduce(f64::max)
    }
}

/// Options of [`psth_samples`] / [`psth_curve`]
#[derive(Clone, Copy)]
pub struct PsthCurveOptions<'a> {
    pub onset: i64,
    pub offset: i64,
    pub timestep: usize,

    /// Target peak of the curve (`None` or zero disables normalization)
    pub normalization: Option<f64>,

    pub contrast: f64,
    pub radius: f64,
    pub parameters: IrdParameters,
    pub shift: f64,

    /// Causal lag: samples at or before this time are clipped to zero
    pub lag: Option<f64>,

    /// Latency offset as a function of radius
    pub tauc_shifter: Option<&'a dyn Fn(f64) -> f64>,

    pub tauc_lock: Option<f64>,
    pub label: &'a str,
}

impl Default for PsthCurveOptions<'_> {
    fn default() -> Self {
        Self {
            onset: 0,
            offset: 250,
            timestep: 1,
            normalization: Some(1.0),
            contrast: 1.0,
            radius: 0.0,
            parameters: IrdParameters::MEDIAN,
            shift: 0.0,
            lag: None,
            tauc_shifter: None,
            tauc_lock: Some(100.0),
            label: "IRD_Model",
        }
    }
}

impl fmt::Debug for PsthCurveOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PsthCurveOptions")
            .field("onset", &self.onset)
            .field("offset", &self.offset)
            .field("timestep", &self.timestep)
            .field("normalization", &self.normalization)
            .field("contrast", &self.contrast)
            .field("radius", &self.radius)
            .field("shift", &self.shift)
            .field("lag", &self.lag)
            .field("tauc_shifter", &self.tauc_shifter.is_some())
            .field("tauc_lock", &self.tauc_lock)
            .field("label", &self.label)
            .finish()
    }
}

/// Integer sample times `onset..=offset` every `timestep`
pub fn sample_times(onset: i64, offset: i64, timestep: usize) -> ModelResult<Vec<i64>> {
    if timestep == 0 || offset < onset {
        return Err(ModelError::InvalidRange {
            onset,
            offset,
            timestep,
        });
    }
    Ok((onset..=offset).step_by(timestep).collect())
}

/// Evaluate the PSTH of `model` over the configured time range
pub fn psth_samples<M>(model: &M, options: &PsthCurveOptions<'_>) -> ModelResult<Vec<(f64, f64)>>
where
    M: PsthModel + ?Sized,
{
    let times = sample_times(options.onset, options.offset, options.timestep)?;

    let tauc_shift = options
        .tauc_shifter
        .map(|shifter| shifter(options.radius))
        .unwrap_or(0.0);

    let sample_options = SampleOptions {
        parameters: options.parameters,
        r0: 0.0,
        shift: options.shift,
        tauc_shift,
        tauc_lock: options.tauc_lock,
    };

    let mut samples: Vec<f64> = times
        .iter()
        .map(|&t| model.sample_v1_psth(t as f64, options.contrast, options.radius, &sample_options))
        .collect();

    if let Some(target) = options.normalization.filter(|n| *n != 0.0) {
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max == 0.0 || !max.is_finite() {
            return Err(ModelError::DegenerateNormalization { max });
        }
        for sample in samples.iter_mut() {
            *sample = target * (*sample / max);
        }
    }

    let lag = options.lag.filter(|l| *l != 0.0);
    let coords = times
        .iter()
        .zip(samples)
        .map(|(&t, s)| {
            let t = t as f64;
            match lag {
                Some(lag) if t <= lag => (t, 0.0),
                _ => (t, s),
            }
        })
        .collect();

    Ok(coords)
}

/// Evaluate the PSTH as a [`Curve`] with `Duration` / `Activity` dimensions
pub fn psth_curve<M>(model: &M, options: &PsthCurveOptions<'_>) -> ModelResult<Curve>
where
    M: PsthModel + ?Sized,
{
    let points = psth_samples(model, options)?;
    Ok(Curve::new(points)
        .with_label(options.label)
        .with_dimensions("Duration", "Activity"))
}
