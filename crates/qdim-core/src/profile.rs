//! Profile log-likelihood over a single parameter.
//!
//! Holds every other parameter at the model's value and scans a grid. This is
//! a diagnostic for identifiability and for checking that simulated data
//! recover their generating parameters; it is not an estimator.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::likelihood::{Condition, log_likelihood_conditions};
use crate::model::{Parameter, Qdim};
use crate::predict::PredictionConfig;

/// Log-likelihood at one grid value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub value: f64,
    pub log_likelihood: f64,
}

/// Evenly spaced grid over `[low, high]` with `steps` points (at least two).
pub fn linear_grid(low: f64, high: f64, steps: usize) -> Vec<f64> {
    let steps = steps.max(2);
    let step = (high - low) / (steps - 1) as f64;
    (0..steps).map(|i| low + step * i as f64).collect()
}

/// Grid spanning `center · (1 ± half_width)`.
pub fn relative_grid(center: f64, half_width: f64, steps: usize) -> Vec<f64> {
    let spread = (center * half_width).abs();
    linear_grid(center - spread, center + spread, steps)
}

/// Batch log-likelihood at each grid value of `parameter`.
pub fn profile_log_likelihood(
    model: &Qdim,
    parameter: Parameter,
    grid: &[f64],
    conditions: &[Condition],
    config: &PredictionConfig,
) -> Result<Vec<ProfilePoint>> {
    log::debug!(
        "profiling {parameter} over {} values, {} conditions",
        grid.len(),
        conditions.len()
    );
    grid.iter()
        .map(|&value| {
            let candidate = model.with(parameter, value)?;
            let log_likelihood = log_likelihood_conditions(&candidate, conditions, config)?;
            log::trace!("{parameter}={value:.6} ll={log_likelihood:.4}");
            Ok(ProfilePoint {
                value,
                log_likelihood,
            })
        })
        .collect()
}

/// Grid point with the highest log-likelihood. NaN entries never win.
pub fn profile_maximum(points: &[ProfilePoint]) -> Option<ProfilePoint> {
    points
        .iter()
        .filter(|p| !p.log_likelihood.is_nan())
        .copied()
        .max_by(|a, b| a.log_likelihood.total_cmp(&b.log_likelihood))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gamble;
    use crate::predict::predict;

    #[test]
    fn test_linear_grid_endpoints() {
        let g = linear_grid(1.0, 2.0, 5);
        assert_eq!(g.len(), 5);
        assert_eq!(g[0], 1.0);
        assert!((g[4] - 2.0).abs() < 1e-15);
        assert!((g[1] - 1.25).abs() < 1e-15);
        assert_eq!(linear_grid(0.0, 1.0, 0).len(), 2);
    }

    #[test]
    fn test_relative_grid_negative_center() {
        let g = relative_grid(-2.0, 0.5, 3);
        assert_eq!(g, vec![-3.0, -2.0, -1.0]);
    }

    #[test]
    fn test_maximum_skips_nan() {
        let points = [
            ProfilePoint {
                value: 1.0,
                log_likelihood: -5.0,
            },
            ProfilePoint {
                value: 2.0,
                log_likelihood: f64::NAN,
            },
            ProfilePoint {
                value: 3.0,
                log_likelihood: -2.0,
            },
            ProfilePoint {
                value: 4.0,
                log_likelihood: f64::NEG_INFINITY,
            },
        ];
        assert_eq!(profile_maximum(&points).map(|p| p.value), Some(3.0));
        assert!(profile_maximum(&[]).is_none());
    }

    #[test]
    fn test_expected_counts_peak_at_truth() {
        // Counts proportional to the model's own prediction maximise the
        // likelihood at the generating gamma.
        let model = Qdim::new(0.7, 2.0, 0.5, 0.5, 2.5).unwrap();
        let gamble = Gamble::new([2.0, -1.0], [2.0, -1.0]);
        let n = 100_000u64;
        let conditions: Vec<Condition> = [true, false]
            .into_iter()
            .map(|won_first| {
                let p = predict(&model, &gamble, won_first).unwrap();
                let mut data = p.map(|pi| (pi * n as f64).round() as u64);
                let sum: u64 = data[..3].iter().sum();
                data[3] = n - sum;
                Condition {
                    gamble,
                    won_first,
                    n,
                    data,
                }
            })
            .collect();
        let grid = relative_grid(2.5, 0.2, 21);
        let points = profile_log_likelihood(
            &model,
            Parameter::Gamma,
            &grid,
            &conditions,
            &PredictionConfig::default(),
        )
        .unwrap();
        let best = profile_maximum(&points).unwrap();
        assert!((best.value - 2.5).abs() < 1e-9, "best gamma {}", best.value);
    }
}
