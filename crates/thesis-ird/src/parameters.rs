// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # IRD Model Parameters
//!
//! Parameter sets reported by Albrecht et al. for the Invariant Response
//! Description of V1 cells. Three canonical presets are provided:
//!
//! | preset | meaning |
//! |--------|---------|
//! | [`IrdParameters::MEANS`] | population mean |
//! | [`IrdParameters::MEDIAN`] | population median |
//! | [`IrdParameters::SPREAD`] | standard deviation of each parameter |
//!
//! Keys are serialized with the names used in the paper (`sigmaA`, `tmax`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Named scalar constants of the IRD model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrdParameters {
    /// Width of the PSTH Gaussian before the peak (and fast component after it)
    #[serde(rename = "sigmaA")]
    pub sigma_a: f64,

    /// Width of the slow decay component after the peak
    #[serde(rename = "sigmaB")]
    pub sigma_b: f64,

    /// Weight of the slow decay component
    pub alpha: f64,

    /// Naka-Rushton exponent
    pub n: f64,

    /// Naka-Rushton semi-saturation contrast
    pub c50: f64,

    /// Latency at zero contrast (ms)
    pub tmax: f64,

    /// Maximal latency reduction at saturating contrast (ms)
    pub tshift: f64,

    /// Exponent of the inverted Naka-Rushton latency function
    pub power: f64,

    /// Semi-saturation contrast of the latency function
    pub s50: f64,

    /// Maximal response amplitude
    pub rmax: f64,
}

impl IrdParameters {
    /// Mean parameter values
    pub const MEANS: IrdParameters = IrdParameters {
        sigma_a: 19.0,
        sigma_b: 761.0,
        alpha: 0.27,
        n: 2.4,
        c50: 38.7,
        tmax: 121.0,
        tshift: 65.3,
        power: 1.80,
        s50: 24.6,
        rmax: 81.8,
    };

    /// Median parameter values
    pub const MEDIAN: IrdParameters = IrdParameters {
        sigma_a: 13.6,
        sigma_b: 543.0,
        alpha: 0.23,
        n: 2.2,
        c50: 32.3,
        tmax: 114.0,
        tshift: 61.2,
        power: 1.18,
        s50: 23.1,
        rmax: 50.9,
    };

    /// Spread (standard deviation) of the parameter values
    pub const SPREAD: IrdParameters = IrdParameters {
        sigma_a: 1.91,
        sigma_b: 76.5,
        alpha: 0.03,
        n: 0.18,
        c50: 3.51,
        tmax: 4.53,
        tshift: 3.48,
        power: 0.28,
        s50: 3.27,
        rmax: 12.2,
    };

    /// Look up a parameter by the name used in the paper
    pub fn get(&self, key: &str) -> Option<f64> {
        let value = match key {
            "sigmaA" => self.sigma_a,
            "sigmaB" => self.sigma_b,
            "alpha" => self.alpha,
            "n" => self.n,
            "c50" => self.c50,
            "tmax" => self.tmax,
            "tshift" => self.tshift,
            "power" => self.power,
            "s50" => self.s50,
            "rmax" => self.rmax,
            _ => return None,
        };
        Some(value)
    }

    /// All parameter names, in the order used by the paper's tables
    pub const KEYS: [&'static str; 10] = [
        "sigmaA", "sigmaB", "alpha", "n", "c50", "tmax", "tshift", "power", "s50", "rmax",
    ];
}

impl Default for IrdParameters {
    fn default() -> Self {
        Self::MEDIAN
    }
}

/// Selects one of the canonical parameter sets by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterPreset {
    #[serde(alias = "means")]
    Mean,
    #[default]
    Median,
    #[serde(alias = "sd")]
    Spread,
}

impl ParameterPreset {
    pub fn parameters(self) -> IrdParameters {
        match self {
            ParameterPreset::Mean => IrdParameters::MEANS,
            ParameterPreset::Median => IrdParameters::MEDIAN,
            ParameterPreset::Spread => IrdParameters::SPREAD,
        }
    }
}

impl From<ParameterPreset> for IrdParameters {
    fn from(preset: ParameterPreset) -> Self {
        preset.parameters()
    }
}

impl fmt::Display for ParameterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterPreset::Mean => "mean",
            ParameterPreset::Median => "median",
            ParameterPreset::Spread => "spread",
        };
        f.write_str(name)
    }
}

impl FromStr for ParameterPreset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean" | "means" => Ok(ParameterPreset::Mean),
            "median" => Ok(ParameterPreset::Median),
            "spread" | "sd" => Ok(ParameterPreset::Spread),
            other => Err(ModelError::InvalidConfiguration(format!(
                "Unknown parameter preset '{}' (expected mean, median or spread)",
                other
            ))),
        }
    }
}
