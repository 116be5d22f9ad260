// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spatiotemporal response view
//!
//! Stacks curves that were regularly sampled in space into a
//! `(position, duration)` image, in the style of Figure 2E of Sit et al. (2009),
//! "Complex Dynamics of V1 Population Responses Explained by a Simple
//! Gain-Control Model". The temporal axis of every curve must be identical.

use ndarray::{Array1, Array2};

use crate::curve::Curve;
use crate::error::{ModelError, ModelResult};
use crate::pattern::SheetBounds;

#[derive(Debug, Clone, PartialEq)]
pub struct SpatioTemporalResponse {
    /// One row per curve, one column per temporal bin
    pub data: Array2<f64>,
    /// Position of the first and last curve
    pub spatial_extent: (f64, f64),
    /// Milliseconds per temporal bin
    pub bin_width: f64,
    pub bounds: SheetBounds,
}

impl SpatioTemporalResponse {
    pub const DEFAULT_SPATIAL_EXTENT: (f64, f64) = (-0.25, 2.75);
    pub const MIN_CURVES: usize = 2;

    /// Build from curves sharing a common X sampling
    pub fn from_curves(curves: &[Curve], spatial_extent: (f64, f64), bin_width: f64) -> ModelResult<Self> {
        let data = build_array(curves)?;
        Ok(Self::from_array(data, spatial_extent, bin_width))
    }

    pub fn from_array(data: Array2<f64>, spatial_extent: (f64, f64), bin_width: f64) -> Self {
        let (ymin, ymax) = spatial_extent;
        let bounds = SheetBounds::new(0.0, ymin, data.ncols() as f64 * bin_width, ymax);
        Self {
            data,
            spatial_extent,
            bin_width,
            bounds,
        }
    }

    pub fn with_bounds(mut self, bounds: SheetBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn num_curves(&self) -> usize {
        self.data.nrows()
    }

    pub fn bin_count(&self) -> usize {
        self.data.ncols()
    }

    /// Evenly spaced positions of the curves across the spatial extent
    pub fn positions(&self) -> Array1<f64> {
        Array1::linspace(self.spatial_extent.0, self.spatial_extent.1, self.num_curves())
    }

    /// The stacked curves as `(position, curve)` pairs
    pub fn overlay(&self) -> Vec<(f64, Curve)> {
        let milliseconds: Vec<f64> = (0..self.bin_count())
            .map(|i| i as f64 * self.bin_width)
            .collect();
        self.positions()
            .iter()
            .zip(self.data.rows())
            .map(|(&position, row)| {
                let points = milliseconds.iter().copied().zip(row.iter().copied()).collect();
                let curve = Curve::new(points)
                    .with_label(format!("{}", position))
                    .with_dimensions("Duration", "Response");
                (position, curve)
            })
            .collect()
    }
}

fn build_array(curves: &[Curve]) -> ModelResult<Array2<f64>> {
    if curves.len() < SpatioTemporalResponse::MIN_CURVES {
        return Err(ModelError::TooFewCurves {
            required: SpatioTemporalResponse::MIN_CURVES,
            actual: curves.len(),
        });
    }

    let xvals = curves[0].xs();
    if let Some(index) = curves.iter().position(|c| c.xs() != xvals) {
        return Err(ModelError::MismatchedSampling { index });
    }

    let mut data = Array2::zeros((curves.len(), xvals.len()));
    for (mut row, curve) in data.rows_mut().into_iter().zip(curves) {
        row.assign(&curve.ys());
    }
    Ok(data)
}
