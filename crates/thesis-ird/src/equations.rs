// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # IRD Equations
//!
//! Closed-form equations from the appendix of Albrecht et al.
//!
//! ```text
//! Naka-Rushton (A2):           R(c)   = c^n / (c^n + c50^n)
//! Inverted Naka-Rushton (A3):  tau(c) = tmax - tshift * c^p / (c^p + s50^p)
//! PSTH (A1), d = t - tau:
//!     t <  tau:  exp(-ln2 * d^2 / sigmaA^2)
//!     t >= tau:  alpha * exp(-ln2 * d^2 / sigmaB^2) + (1 - alpha) * exp(-ln2 * d^2 / sigmaA^2)
//! ```
//!
//! Scalar forms operate on `f64`; the `*_array` forms map the scalar form over
//! an ndarray of any dimensionality and return an array of the same shape.

use ndarray::{Array, ArrayBase, Data, Dimension};
use std::f64::consts::LN_2;

/// Constants of the LGN latency fit (onset latencies from Sit et al.)
///
/// Obtained by fitting the inverted Naka-Rushton form to contrasts
/// `[100, 50, 25, 12.5, 9, 6]` and latencies `[18, 21, 25, 33, 36, 44]` with
/// `tmax` held fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LgnLatency {
    pub tmax: f64,
    pub tshift: f64,
    pub power: f64,
    pub s50: f64,
}

impl Default for LgnLatency {
    fn default() -> Self {
        Self {
            tmax: 44.0,
            tshift: 25.25,
            power: 2.3,
            s50: 14.5,
        }
    }
}

#[inline]
fn saturating_fraction(contrast: f64, exponent: f64, semi_saturation: f64) -> f64 {
    let cpower = contrast.powf(exponent);
    cpower / (cpower + semi_saturation.powf(exponent))
}

/// Inverted Naka-Rushton latency of V1 (Eq A3)
#[inline]
pub fn latency_v1(contrast: f64, tmax: f64, tshift: f64, power: f64, s50: f64) -> f64 {
    tmax - tshift * saturating_fraction(contrast, power, s50)
}

/// Inverted Naka-Rushton latency of the LGN
#[inline]
pub fn latency_lgn(contrast: f64, constants: &LgnLatency) -> f64 {
    latency_v1(
        contrast,
        constants.tmax,
        constants.tshift,
        constants.power,
        constants.s50,
    )
}

/// Naka-Rushton contrast response (Eq A2), in `[0, 1)` for finite contrast
#[inline]
pub fn naka_rushton(contrast: f64, n: f64, c50: f64) -> f64 {
    saturating_fraction(contrast, n, c50)
}

/// Dual-Gaussian PSTH (Eq A1), equal to 1 at `t == tau_c`
#[inline]
pub fn v1_psth(t: f64, tau_c: f64, alpha: f64, sigma_a: f64, sigma_b: f64) -> f64 {
    let delta_t_sq = (t - tau_c).powi(2);
    let fast = (-LN_2 * (delta_t_sq / sigma_a.powi(2))).exp();
    if t < tau_c {
        fast
    } else {
        let slow = (-LN_2 * (delta_t_sq / sigma_b.powi(2))).exp();
        alpha * slow + (1.0 - alpha) * fast
    }
}

pub fn latency_v1_array<S, D>(
    contrast: &ArrayBase<S, D>,
    tmax: f64,
    tshift: f64,
    power: f64,
    s50: f64,
) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    contrast.mapv(|c| latency_v1(c, tmax, tshift, power, s50))
}

pub fn latency_lgn_array<S, D>(contrast: &ArrayBase<S, D>, constants: &LgnLatency) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    contrast.mapv(|c| latency_lgn(c, constants))
}

pub fn naka_rushton_array<S, D>(contrast: &ArrayBase<S, D>, n: f64, c50: f64) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    contrast.mapv(|c| naka_rushton(c, n, c50))
}

pub fn v1_psth_array<S, D>(
    t: &ArrayBase<S, D>,
    tau_c: f64,
    alpha: f64,
    sigma_a: f64,
    sigma_b: f64,
) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    t.mapv(|t| v1_psth(t, tau_c, alpha, sigma_a, sigma_b))
}
