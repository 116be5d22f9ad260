//! Tests for the synthetic profile pipeline
//!
//! Covers the end-to-end behaviour of `SyntheticProfiles`: configuration
//! validation, spatial invariants of the response stack and the interaction
//! of baseline and lag.

use approx::assert_relative_eq;
use ndarray::Array2;
use thesis_ird::*;

fn base_settings() -> ProfileSettings {
    ProfileSettings {
        density: 6,
        offset: 150,
        contrast_multiplier: 80.0,
        ..ProfileSettings::default()
    }
}

#[cfg(test)]
mod test_validation {
    use super::*;

    #[test]
    fn test_tauc_lock_without_peak_scaling_is_rejected() {
        let profiles = SyntheticProfiles::new(ProfileSettings {
            tauc_lock: Some(100.0),
            peak_scaling: false,
            ..base_settings()
        });
        let err = profiles.synthesize().unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("peak_scaling"));
    }

    #[test]
    fn test_explicit_lag_outside_explicit_mode_is_rejected() {
        for mode in [LagMode::Variable, LagMode::Constant] {
            let profiles = SyntheticProfiles::new(ProfileSettings {
                lag: 5.0,
                lag_mode: mode,
                ..base_settings()
            });
            assert!(profiles.synthesize().is_err(), "lag_mode {:?} accepted", mode);
        }
    }
}

#[cfg(test)]
mod test_stack_invariants {
    use super::*;

    #[test]
    fn test_uniform_pattern_gives_identical_series() {
        let stack = SyntheticProfiles::new(base_settings())
            .with_pattern(ConstantPattern::new(0.75))
            .synthesize()
            .unwrap();

        let reference = stack.pixel_series(0, 0).to_owned();
        let (rows, cols) = stack.frame_shape();
        for row in 0..rows {
            for col in 0..cols {
                assert_eq!(stack.pixel_series(row, col), reference, "pixel ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_frames_share_shape_and_fixed_step() {
        let stack = SyntheticProfiles::new(ProfileSettings {
            timestep: 3,
            ..base_settings()
        })
        .synthesize()
        .unwrap();

        assert!(stack.times().windows(2).all(|w| w[1] - w[0] == 3));
        for (_, frame) in stack.iter() {
            assert_eq!(frame.dim(), (6, 6));
        }
    }

    #[test]
    fn test_response_follows_pattern_contrast() {
        // Brighter pixels respond more strongly (Naka-Rushton is monotonic)
        let mut data = Array2::from_elem((6, 6), 0.2);
        data[[2, 3]] = 1.0;
        let pattern = ArrayPattern::new(data, SheetBounds::default());
        let stack = SyntheticProfiles::new(base_settings())
            .with_pattern(pattern)
            .synthesize()
            .unwrap();

        let peak = |row, col| {
            stack
                .pixel_series(row, col)
                .iter()
                .copied()
                .fold(f64::MIN, f64::max)
        };
        assert!(peak(2, 3) > peak(0, 0));
        assert_relative_eq!(peak(0, 0), peak(5, 5), epsilon = 1e-12);
    }

    #[test]
    fn test_radius_dependent_latency() {
        let stack = SyntheticProfiles::new(base_settings())
            .with_pattern(ConstantPattern::new(1.0))
            .with_tauc_shifter(|radius| 40.0 * radius)
            .synthesize()
            .unwrap();

        let argmax = |row, col| {
            let curve = stack.pixel_curve(row, col);
            curve
                .points
                .iter()
                .copied()
                .fold((0.0, f64::MIN), |acc, p| if p.1 > acc.1 { p } else { acc })
                .0
        };
        // Corner pixels are further from the centre than central ones
        assert!(argmax(0, 0) > argmax(2, 2));
        assert_eq!(argmax(0, 0), argmax(5, 5));
    }

    #[test]
    fn test_peak_scaling_zero_pixel_is_silent() {
        let data = Array2::from_shape_vec((2, 2), vec![1.0, 0.0, 0.5, 0.25]).unwrap();
        let stack = SyntheticProfiles::new(ProfileSettings {
            density: 2,
            peak_scaling: true,
            tauc_lock: Some(100.0),
            ..base_settings()
        })
        .with_pattern(ArrayPattern::new(data, SheetBounds::default()))
        .synthesize()
        .unwrap();

        let peak = |row, col| {
            stack
                .pixel_series(row, col)
                .iter()
                .copied()
                .fold(f64::MIN, f64::max)
        };
        assert_relative_eq!(peak(0, 0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(peak(1, 0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(peak(1, 1), 0.25, epsilon = 1e-12);
        assert!(stack.pixel_series(0, 1).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_peak_multiplier_scales_output() {
        let single = SyntheticProfiles::new(base_settings()).synthesize().unwrap();
        let double = SyntheticProfiles::new(ProfileSettings {
            peak_multiplier: 2.0,
            ..base_settings()
        })
        .synthesize()
        .unwrap();
        for (a, b) in single.data().iter().zip(double.data().iter()) {
            assert_relative_eq!(*b, 2.0 * a, epsilon = 1e-12);
        }
    }
}

#[cfg(test)]
mod test_baseline {
    use super::*;

    fn with_baseline(baseline: f64, mode: BaselineMode) -> ResponseStack {
        SyntheticProfiles::new(ProfileSettings {
            lag: 30.0,
            baseline,
            baseline_mode: mode,
            ..base_settings()
        })
        .with_pattern(ConstantPattern::new(1.0))
        .synthesize()
        .unwrap()
    }

    #[test]
    fn test_baseline_raises_post_lag_samples() {
        let plain = with_baseline(0.0, BaselineMode::Local);
        let raised = with_baseline(10.0, BaselineMode::Local);

        for ((t, before), (_, after)) in plain.iter().zip(raised.iter()) {
            if t <= 30 {
                assert!(after.iter().all(|v| *v == 0.0), "t={} should be zero", t);
            } else if t < 150 {
                for (b, a) in before.iter().zip(after.iter()) {
                    assert!(a >= b, "t={}: {} < {}", t, a, b);
                }
            }
        }
    }

    #[test]
    fn test_local_baseline_is_percentage_of_peak() {
        let plain = with_baseline(0.0, BaselineMode::Local);
        let raised = with_baseline(10.0, BaselineMode::Local);
        let peak = plain.pixel_series(0, 0).iter().copied().fold(f64::MIN, f64::max);

        let t_index = plain.times().iter().position(|t| *t == 100).unwrap();
        let delta = raised.pixel_series(0, 0)[t_index] - plain.pixel_series(0, 0)[t_index];
        assert_relative_eq!(delta, 0.1 * peak, epsilon = 1e-9);

        // The final sample (t == offset) does not receive the baseline
        let last = plain.len() - 1;
        assert_eq!(raised.pixel_series(0, 0)[last], plain.pixel_series(0, 0)[last]);
    }

    #[test]
    fn test_zero_lag_clears_first_frame() {
        let stack = SyntheticProfiles::new(ProfileSettings {
            density: 2,
            baseline: 10.0,
            ..base_settings()
        })
        .with_pattern(ConstantPattern::new(1.0))
        .synthesize()
        .unwrap();

        let first = stack.frame_at(0).unwrap();
        assert!(first.iter().all(|v| *v == 0.0));
        assert!(stack.frame_at(1).unwrap().iter().all(|v| *v > 0.0));
    }

    fn assert_baseline_window(mode: LagMode, lag_of: impl Fn(f64) -> f64) {
        let mut data = Array2::from_elem((3, 3), 0.3);
        data[[0, 0]] = 0.05;
        data[[1, 1]] = 1.0;
        data[[2, 2]] = 0.6;
        let run = |baseline| {
            SyntheticProfiles::new(ProfileSettings {
                density: 3,
                lag_mode: mode,
                baseline,
                baseline_mode: BaselineMode::Global,
                ..base_settings()
            })
            .with_pattern(ArrayPattern::new(data.clone(), SheetBounds::default()))
            .synthesize()
            .unwrap()
        };
        let plain = run(0.0);
        let raised = run(5.0);

        for row in 0..3 {
            for col in 0..3 {
                let lag = lag_of(data[[row, col]] * 80.0);
                let before = plain.pixel_series(row, col);
                let after = raised.pixel_series(row, col);
                for (i, &t) in plain.times().iter().enumerate() {
                    let t = t as f64;
                    if t <= lag {
                        assert_eq!(after[i], 0.0, "{:?} ({}, {}) t={}", mode, row, col, t);
                    } else if t < 150.0 {
                        assert_relative_eq!(after[i] - before[i], 4.0, epsilon = 1e-9);
                    } else {
                        assert_eq!(after[i], before[i]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_variable_lag_baseline_window_per_pixel() {
        assert_baseline_window(LagMode::Variable, |c| IrdModel.latency_lgn(c));
    }

    #[test]
    fn test_constant_lag_baseline_window_per_pixel() {
        assert_baseline_window(LagMode::Constant, |_| IrdModel.latency_lgn(80.0));
    }

    #[test]
    fn test_global_baseline_uses_contrast_multiplier() {
        let plain = with_baseline(0.0, BaselineMode::Global);
        let raised = with_baseline(5.0, BaselineMode::Global);
        let t_index = plain.times().iter().position(|t| *t == 100).unwrap();
        let delta = raised.pixel_series(3, 3)[t_index] - plain.pixel_series(3, 3)[t_index];
        assert_relative_eq!(delta, 0.05 * 80.0, epsilon = 1e-9);
    }
}

#[cfg(test)]
mod test_curves {
    use super::*;

    #[test]
    fn test_curve_sampler_through_model_trait() {
        let model: &dyn PsthModel = &IrdModel;
        let options = PsthCurveOptions {
            offset: 100,
            normalization: Some(2.0),
            contrast: 60.0,
            ..PsthCurveOptions::default()
        };
        let curve = psth_curve(model, &options).unwrap();
        assert_eq!(curve.len(), 101);
        assert_relative_eq!(curve.max_value().unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_spatiotemporal_response_from_stack() {
        let stack = SyntheticProfiles::new(base_settings())
            .with_pattern(GaussianPattern {
                size: 0.8,
                ..GaussianPattern::default()
            })
            .synthesize()
            .unwrap();

        // Curves along the middle row, as in Sit et al. Figure 2E
        let curves: Vec<Curve> = (0..6).map(|col| stack.pixel_curve(3, col)).collect();
        let view = SpatioTemporalResponse::from_curves(&curves, (0.25, 2.75), 1.0).unwrap();
        assert_eq!(view.data.dim(), (6, 151));
        assert_eq!(view.bounds.right, 151.0);
    }
}
