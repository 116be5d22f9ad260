// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synthesis from configuration and a serialisable summary of the result

use serde::Serialize;
use thesis_ird::{ModelResult, ProfileSettings, ResponseStack, SheetBounds, SyntheticProfiles};
use tracing::info;

/// Validate the settings and synthesize the response stack
pub fn synthesize(settings: &ProfileSettings) -> ModelResult<ResponseStack> {
    settings.validate()?;
    let stack = SyntheticProfiles::new(settings.clone()).synthesize()?;
    info!(
        "[SYNTHESIS] {} frames of {:?} (peak {:.4})",
        stack.len(),
        stack.frame_shape(),
        stack.peak()
    );
    Ok(stack)
}

/// Overview of a synthesized response stack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSummary {
    pub frames: usize,
    pub frame_shape: (usize, usize),
    pub first_time: Option<i64>,
    pub last_time: Option<i64>,
    pub bounds: SheetBounds,
    pub value_dimension: String,
    pub peak: f64,
    /// Time of the first frame reaching `peak`
    pub peak_time: Option<i64>,
    /// Per-frame maxima, in time order
    pub frame_peaks: Vec<(i64, f64)>,
}

impl StackSummary {
    pub fn new(stack: &ResponseStack) -> Self {
        let frame_peaks: Vec<(i64, f64)> = stack
            .iter()
            .map(|(t, frame)| (t, frame.iter().copied().fold(f64::NEG_INFINITY, f64::max)))
            .collect();
        let peak = stack.peak();
        let peak_time = frame_peaks
            .iter()
            .find(|(_, value)| *value == peak)
            .map(|(t, _)| *t);

        Self {
            frames: stack.len(),
            frame_shape: stack.frame_shape(),
            first_time: stack.times().first().copied(),
            last_time: stack.times().last().copied(),
            bounds: stack.bounds(),
            value_dimension: stack.value_dimension().to_string(),
            peak,
            peak_time,
            frame_peaks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thesis_ird::{ConstantPattern, PatternSpec};

    #[test]
    fn test_summary_of_default_stack() {
        let settings = ProfileSettings {
            density: 4,
            contrast_multiplier: 100.0,
            offset: 120,
            pattern: PatternSpec::Constant(ConstantPattern::new(1.0)),
            ..ProfileSettings::default()
        };
        let stack = synthesize(&settings).unwrap();
        let summary = StackSummary::new(&stack);

        assert_eq!(summary.frames, 121);
        assert_eq!(summary.first_time, Some(0));
        assert_eq!(summary.last_time, Some(120));
        assert_eq!(summary.frame_peaks.len(), 121);
        let peak_time = summary.peak_time.unwrap();
        assert!(peak_time > 0 && peak_time < 120);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = ProfileSettings {
            peak_scaling: true,
            ..ProfileSettings::default()
        };
        assert!(synthesize(&settings).is_err());
    }
}
