// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Spatial Patterns
//!
//! Patterns are continuous functions over sheet coordinates. Rendering a
//! pattern samples it at the centres of a regular grid:
//!
//! ```text
//! x = left + (col + 0.5) / density
//! y = top  - (row + 0.5) / density
//! ```
//!
//! so row 0 is the top of the sheet and the grid is centred on the bounds.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Rectangular region of sheet coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetBounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl SheetBounds {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Square bounds of the given radius centred on the origin
    pub fn with_radius(radius: f64) -> Self {
        Self::new(-radius, -radius, radius, radius)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// `(left, bottom, right, top)`
    pub fn lbrt(&self) -> (f64, f64, f64, f64) {
        (self.left, self.bottom, self.right, self.top)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }
}

impl Default for SheetBounds {
    fn default() -> Self {
        Self::with_radius(0.5)
    }
}

/// A sampled 2D array together with its sheet coordinate system
#[derive(Debug, Clone, PartialEq)]
pub struct SheetImage {
    pub data: Array2<f64>,
    pub bounds: SheetBounds,
    pub xdensity: f64,
    pub ydensity: f64,
}

impl SheetImage {
    /// Wrap an existing array; densities are derived from its shape
    pub fn from_array(data: Array2<f64>, bounds: SheetBounds) -> Self {
        let (rows, cols) = data.dim();
        Self {
            xdensity: cols as f64 / bounds.width(),
            ydensity: rows as f64 / bounds.height(),
            data,
            bounds,
        }
    }

    /// Sheet coordinates `(x, y)` of the centre of matrix element `(row, col)`
    pub fn matrix_to_sheet(&self, row: usize, col: usize) -> (f64, f64) {
        let x = self.bounds.left + (col as f64 + 0.5) / self.xdensity;
        let y = self.bounds.top - (row as f64 + 0.5) / self.ydensity;
        (x, y)
    }

    /// Matrix element `(row, col)` containing sheet point `(x, y)`, if inside
    pub fn sheet_to_matrix(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let (rows, cols) = self.data.dim();
        let col = ((x - self.bounds.left) * self.xdensity).floor() as usize;
        let row = ((self.bounds.top - y) * self.ydensity).floor() as usize;
        // Points on the right/bottom edge belong to the last element
        Some((row.min(rows.saturating_sub(1)), col.min(cols.saturating_sub(1))))
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}

/// Continuous spatial pattern over sheet coordinates
pub trait SpatialPattern {
    fn value(&self, x: f64, y: f64) -> f64;

    fn bounds(&self) -> SheetBounds {
        SheetBounds::default()
    }

    /// Sample the pattern at `density` points per unit length on both axes
    fn render(&self, density: usize) -> SheetImage {
        let bounds = self.bounds();
        let density = density as f64;
        let rows = (bounds.height() * density).round() as usize;
        let cols = (bounds.width() * density).round() as usize;

        let mut image = SheetImage {
            data: Array2::zeros((rows, cols)),
            bounds,
            xdensity: density,
            ydensity: density,
        };
        for row in 0..rows {
            for col in 0..cols {
                let (x, y) = image.matrix_to_sheet(row, col);
                image.data[[row, col]] = self.value(x, y);
            }
        }
        image
    }
}

/// Two-dimensional Gaussian
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianPattern {
    /// Height of the Gaussian; the vertical standard deviation is `size / 8`
    pub size: f64,
    /// Ratio of horizontal to vertical width
    pub aspect_ratio: f64,
    pub x: f64,
    pub y: f64,
    /// Rotation in radians (counter-clockwise)
    pub orientation: f64,
    pub scale: f64,
    pub offset: f64,
}

impl Default for GaussianPattern {
    fn default() -> Self {
        Self {
            size: 0.155,
            aspect_ratio: 1.0,
            x: 0.0,
            y: 0.0,
            orientation: 0.0,
            scale: 1.0,
            offset: 0.0,
        }
    }
}

impl SpatialPattern for GaussianPattern {
    fn value(&self, x: f64, y: f64) -> f64 {
        let (dx, dy) = (x - self.x, y - self.y);
        let (sin, cos) = self.orientation.sin_cos();
        let px = cos * dx + sin * dy;
        let py = cos * dy - sin * dx;

        let ysigma = self.size / 4.0 / 2.0;
        let xsigma = self.aspect_ratio * ysigma;
        let gaussian = if xsigma == 0.0 || ysigma == 0.0 {
            if px == 0.0 && py == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            let xw = px / xsigma;
            let yh = py / ysigma;
            (-0.5 * xw * xw - 0.5 * yh * yh).exp()
        };
        gaussian * self.scale + self.offset
    }
}

/// Uniform pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantPattern {
    pub value: f64,
}

impl ConstantPattern {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl SpatialPattern for ConstantPattern {
    fn value(&self, _x: f64, _y: f64) -> f64 {
        self.value
    }
}

/// Pattern backed by a caller-supplied matrix (nearest-sample lookup)
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    image: SheetImage,
}

impl ArrayPattern {
    pub fn new(data: Array2<f64>, bounds: SheetBounds) -> Self {
        Self {
            image: SheetImage::from_array(data, bounds),
        }
    }

    pub fn image(&self) -> &SheetImage {
        &self.image
    }
}

impl SpatialPattern for ArrayPattern {
    fn value(&self, x: f64, y: f64) -> f64 {
        self.image
            .sheet_to_matrix(x, y)
            .map(|idx| self.image.data[idx])
            .unwrap_or(0.0)
    }

    fn bounds(&self) -> SheetBounds {
        self.image.bounds
    }
}

/// Serializable choice of pattern for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PatternSpec {
    Gaussian(GaussianPattern),
    Constant(ConstantPattern),
}

impl Default for PatternSpec {
    fn default() -> Self {
        PatternSpec::Gaussian(GaussianPattern::default())
    }
}

impl SpatialPattern for PatternSpec {
    fn value(&self, x: f64, y: f64) -> f64 {
        match self {
            PatternSpec::Gaussian(pattern) => pattern.value(x, y),
            PatternSpec::Constant(pattern) => pattern.value(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_render_shape_and_coordinates() {
        let image = ConstantPattern::new(0.3).render(30);
        assert_eq!(image.shape(), (30, 30));
        let (x, y) = image.matrix_to_sheet(0, 0);
        assert_relative_eq!(x, -0.5 + 0.5 / 30.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.5 - 0.5 / 30.0, epsilon = 1e-12);
        assert!(image.data.iter().all(|v| *v == 0.3));
    }

    #[test]
    fn test_matrix_sheet_round_trip() {
        let image = ConstantPattern::new(1.0).render(10);
        for row in 0..10 {
            for col in 0..10 {
                let (x, y) = image.matrix_to_sheet(row, col);
                assert_eq!(image.sheet_to_matrix(x, y), Some((row, col)));
            }
        }
        assert_eq!(image.sheet_to_matrix(0.6, 0.0), None);
    }

    #[test]
    fn test_gaussian_peak_and_symmetry() {
        let gaussian = GaussianPattern::default();
        assert_eq!(gaussian.value(0.0, 0.0), 1.0);
        assert_relative_eq!(gaussian.value(0.1, 0.0), gaussian.value(0.0, 0.1), epsilon = 1e-12);
        assert_relative_eq!(gaussian.value(0.1, 0.0), gaussian.value(-0.1, 0.0), epsilon = 1e-12);

        // One standard deviation away (size / 8)
        let sigma = gaussian.size / 8.0;
        assert_relative_eq!(gaussian.value(0.0, sigma), (-0.5f64).exp(), epsilon = 1e-12);

        let image = gaussian.render(20);
        let max = image.data.iter().copied().fold(f64::MIN, f64::max);
        // Even density: four pixels straddle the centre and share the maximum
        assert_relative_eq!(image.data[[9, 9]], max, epsilon = 1e-12);
        assert_relative_eq!(image.data[[10, 10]], max, epsilon = 1e-12);
    }

    #[test]
    fn test_elongated_gaussian() {
        let wide = GaussianPattern {
            aspect_ratio: 3.0,
            ..GaussianPattern::default()
        };
        assert!(wide.value(0.05, 0.0) > wide.value(0.0, 0.05));

        let rotated = GaussianPattern {
            orientation: std::f64::consts::FRAC_PI_2,
            ..wide
        };
        assert_relative_eq!(rotated.value(0.0, 0.05), wide.value(0.05, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_array_pattern_lookup() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let pattern = ArrayPattern::new(data.clone(), SheetBounds::default());
        assert_eq!(pattern.value(-0.25, 0.25), 1.0);
        assert_eq!(pattern.value(0.25, -0.25), 4.0);
        assert_eq!(pattern.value(2.0, 2.0), 0.0);
        assert_eq!(pattern.render(2).data, data);
    }

    #[test]
    fn test_pattern_spec_deserialization() {
        let spec: PatternSpec =
            serde_json::from_str(r#"{"kind": "gaussian", "size": 0.4}"#).unwrap();
        match spec {
            PatternSpec::Gaussian(g) => {
                assert_eq!(g.size, 0.4);
                assert_eq!(g.aspect_ratio, 1.0);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
        let constant: PatternSpec =
            serde_json::from_str(r#"{"kind": "constant", "value": 0.5}"#).unwrap();
        assert_eq!(constant.value(0.1, 0.2), 0.5);
    }
}
