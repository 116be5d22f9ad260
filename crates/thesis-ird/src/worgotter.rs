// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bezier spline reproduction of the Worgotter LGN PSTH
//!
//! The curve was traced from the published figure as a relative SVG path.
//! Onset (or peak) time and stimulus duration are adjusted by shifting the
//! relevant relative vertices before accumulating them into absolute
//! coordinates.

use ndarray::Array2;

/// Relative vertices of the traced path (first entry is the move-to origin)
const RELATIVE_VERTICES: [[f64; 2]; 22] = [
    [0.0, 0.0],
    [799.00838, 7.50244],
    [7.50243, -7.5024],
    [22.50727, -635.83062],
    [33.76092, -635.83062],
    [11.25362, 0.0],
    [18.75609, 641.45745],
    [41.26336, 641.45745],
    [22.50727, 0.0],
    [20.6317, -200.6899],
    [50.64137, -200.6899],
    [30.00971, 0.0],
    [39.0194, 60.83052],
    [48.76579, 71.27306],
    [26.25849, 45.014549],
    [1222.8955, 26.258491],
    [11.2537, 9.378044],
    [28.1341, 135.043659],
    [43.139, 136.919299],
    [15.0049, 1.87558],
    [69.3974, 20.63167],
    [88.1535, 7.50241],
];

const VERTEX_SCALE: f64 = 0.5;
const PEAK_HEIGHT: f64 = 635.0;

const ONSET_DEFAULT_MS: f64 = 398.12;
const PEAK_DEFAULT_MS: f64 = 431.39;
const DURATION_DEFAULT_MS: f64 = 797.89;

const ONSET_INDEX: usize = 1;
const OFFSET_INDEX: usize = 15;

/// Options of the Worgotter PSTH reproduction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorgotterPsth {
    pub onset_ms: f64,
    pub duration_ms: f64,
    /// Height of the peak
    pub peak: f64,
    pub peak_ms: f64,
    /// Position the curve by its peak (`peak_ms`) rather than its onset
    pub peak_relative: bool,
}

impl Default for WorgotterPsth {
    fn default() -> Self {
        Self {
            onset_ms: 400.0,
            duration_ms: 800.0,
            peak: 1.0,
            peak_ms: 430.0,
            peak_relative: true,
        }
    }
}

impl WorgotterPsth {
    /// Absolute control points as an `(N, 2)` array of `[time, activity]`
    pub fn control_points(&self) -> Array2<f64> {
        let onset_shift = if self.peak_relative {
            self.peak_ms - PEAK_DEFAULT_MS
        } else {
            self.onset_ms - ONSET_DEFAULT_MS
        };

        let mut points = Array2::zeros((RELATIVE_VERTICES.len(), 2));
        let (mut x, mut y) = (0.0, 0.0);
        for (i, [dx, dy]) in RELATIVE_VERTICES.iter().enumerate() {
            let mut dx = dx * VERTEX_SCALE;
            let dy = dy * VERTEX_SCALE;
            if i == ONSET_INDEX {
                dx += onset_shift;
            }
            if i == OFFSET_INDEX {
                dx += self.duration_ms - DURATION_DEFAULT_MS;
            }
            x += dx;
            y += dy;
            points[[i, 0]] = x;
            points[[i, 1]] = -y * (1.0 / PEAK_HEIGHT) * self.peak;
        }
        points
    }

    /// Control points as a quadratic Bezier path
    pub fn spline(&self) -> Spline {
        let points = self.control_points();
        let vertices: Vec<(f64, f64)> = points.rows().into_iter().map(|r| (r[0], r[1])).collect();
        let mut codes = vec![PathCode::Curve3; vertices.len()];
        if let Some(first) = codes.first_mut() {
            *first = PathCode::MoveTo;
        }
        Spline { vertices, codes }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCode {
    MoveTo,
    /// Quadratic Bezier vertex (control point, then end point)
    Curve3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub vertices: Vec<(f64, f64)>,
    pub codes: Vec<PathCode>,
}

impl Spline {
    /// Flatten the path into a polyline
    ///
    /// Each quadratic segment contributes `samples_per_segment` points. A
    /// trailing control point without an end point is joined with a line.
    pub fn evaluate(&self, samples_per_segment: usize) -> Vec<(f64, f64)> {
        let mut out = Vec::new();
        let Some(&start) = self.vertices.first() else {
            return out;
        };
        out.push(start);

        let samples = samples_per_segment.max(1);
        let mut current = start;
        let mut i = 1;
        while i < self.vertices.len() {
            match self.codes[i] {
                PathCode::MoveTo => {
                    current = self.vertices[i];
                    out.push(current);
                    i += 1;
                }
                PathCode::Curve3 if i + 1 < self.vertices.len() => {
                    let control = self.vertices[i];
                    let end = self.vertices[i + 1];
                    for step in 1..=samples {
                        let t = step as f64 / samples as f64;
                        let u = 1.0 - t;
                        let x = u * u * current.0 + 2.0 * u * t * control.0 + t * t * end.0;
                        let y = u * u * current.1 + 2.0 * u * t * control.1 + t * t * end.1;
                        out.push((x, y));
                    }
                    current = end;
                    i += 2;
                }
                PathCode::Curve3 => {
                    current = self.vertices[i];
                    out.push(current);
                    i += 1;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_control_points() {
        let points = WorgotterPsth::default().control_points();
        assert_eq!(points.dim(), (22, 2));
        assert_relative_eq!(points[[1, 0]], 398.11419, epsilon = 1e-9);
        assert_relative_eq!(points[[4, 0]], 429.9995, epsilon = 1e-9);
        assert_relative_eq!(points[[4, 1]], 1.001308031496063, epsilon = 1e-12);
        assert_relative_eq!(points[[15, 0]], 1198.11065, epsilon = 1e-9);
        assert_relative_eq!(points[[21, 0]], 1325.6519500000002, epsilon = 1e-9);
    }

    #[test]
    fn test_onset_positioning_and_peak_scaling() {
        let psth = WorgotterPsth {
            onset_ms: 410.0,
            peak: 2.0,
            peak_relative: false,
            ..WorgotterPsth::default()
        };
        let points = psth.control_points();
        assert_relative_eq!(points[[1, 0]], 411.38419, epsilon = 1e-9);
        let max = points.column(1).iter().copied().fold(f64::MIN, f64::max);
        assert_relative_eq!(max, 2.002616062992126, epsilon = 1e-12);
    }

    #[test]
    fn test_spline_codes_and_evaluation() {
        let spline = WorgotterPsth::default().spline();
        assert_eq!(spline.codes[0], PathCode::MoveTo);
        assert!(spline.codes[1..].iter().all(|c| *c == PathCode::Curve3));

        let polyline = spline.evaluate(4);
        // 21 Curve3 vertices: ten quadratic segments plus one trailing line
        assert_eq!(polyline.len(), 1 + 10 * 4 + 1);
        assert_eq!(polyline[0], spline.vertices[0]);
        assert_eq!(*polyline.last().unwrap(), *spline.vertices.last().unwrap());
        // Segment end points land on the path vertices
        assert_eq!(polyline[4], spline.vertices[2]);
    }
}
