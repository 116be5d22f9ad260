// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # PSTH Model Architecture
//!
//! The synthesizer evaluates responses through the [`PsthModel`] trait so that
//! alternative models can replace individual equations (for example a
//! different LGN latency fit) while keeping the rest of the IRD pipeline.
//!
//! ## Adding a New PSTH Model
//!
//! 1. Create a unit struct for the model
//! 2. Implement `PsthModel`, overriding only the equations that differ
//! 3. Pass it to `SyntheticProfiles::with_model`

use crate::equations::{self, LgnLatency};
use crate::parameters::IrdParameters;

/// Options of a single `(time, contrast)` sample of the IRD model (Eq A4)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOptions {
    pub parameters: IrdParameters,

    /// Additive response offset
    pub r0: f64,

    /// Temporal offset added to the sample time to match the data
    pub shift: f64,

    /// Offset added to the computed latency
    pub tauc_shift: f64,

    /// Contrast used only for the latency computation (`None` or zero disables it)
    pub tauc_lock: Option<f64>,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            parameters: IrdParameters::MEDIAN,
            r0: 0.0,
            shift: 50.0,
            tauc_shift: 0.0,
            tauc_lock: Some(100.0),
        }
    }
}

/// Normalize an optional lock value: zero behaves as "not locked"
#[inline]
pub(crate) fn active_lock(tauc_lock: Option<f64>) -> Option<f64> {
    tauc_lock.filter(|lock| *lock != 0.0)
}

/// Equations of a PSTH model
///
/// Every method has the IRD implementation as its default.
pub trait PsthModel {
    fn model_name(&self) -> &'static str;

    /// Response latency of V1 for a contrast at a given radius
    ///
    /// The IRD latency does not depend on radius; spatial latency offsets are
    /// applied through a tauC shifter instead.
    fn latency_v1(&self, contrast: f64, _radius: f64, parameters: &IrdParameters) -> f64 {
        equations::latency_v1(
            contrast,
            parameters.tmax,
            parameters.tshift,
            parameters.power,
            parameters.s50,
        )
    }

    /// Latency of the LGN afferents, used as the causal lag of V1
    fn latency_lgn(&self, contrast: f64) -> f64 {
        equations::latency_lgn(contrast, &LgnLatency::default())
    }

    fn naka_rushton(&self, contrast: f64, parameters: &IrdParameters) -> f64 {
        equations::naka_rushton(contrast, parameters.n, parameters.c50)
    }

    fn v1_psth(&self, t: f64, tau_c: f64, parameters: &IrdParameters) -> f64 {
        equations::v1_psth(
            t,
            tau_c,
            parameters.alpha,
            parameters.sigma_a,
            parameters.sigma_b,
        )
    }

    /// Combined IRD response at one `(time, contrast)` pair (Eq A4)
    fn sample_v1_psth(&self, time: f64, contrast: f64, radius: f64, options: &SampleOptions) -> f64 {
        let p = &options.parameters;
        let time = time + options.shift;
        let latency_contrast = active_lock(options.tauc_lock).unwrap_or(contrast);
        let tau_c = self.latency_v1(latency_contrast, radius, p) + options.tauc_shift;

        let unmodulated = self.v1_psth(time, tau_c, p);
        let contrast_factor = self.naka_rushton(contrast, p);
        p.rmax * contrast_factor * unmodulated + options.r0
    }
}

/// Invariant Response Description model of Albrecht et al.
#[derive(Debug, Clone, Copy, Default)]
pub struct IrdModel;

impl IrdModel {
    pub fn new() -> Self {
        Self
    }
}

impl PsthModel for IrdModel {
    fn model_name(&self) -> &'static str {
        "Invariant Response Description (IRD)"
    }
}
