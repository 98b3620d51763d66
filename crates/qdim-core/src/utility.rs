//! Reference-dependent utilities and the utility differences that drive
//! belief rotation.

use crate::model::{Gamble, Qdim};

/// Power utility with loss aversion: `v^α` for gains, `-λ·|v|^α` for losses.
///
/// `utility(0, α, λ) == 0` for every `λ`.
pub fn utility(v: f64, alpha: f64, lambda: f64) -> f64 {
    if v >= 0.0 {
        v.powf(alpha)
    } else {
        -lambda * v.abs().powf(alpha)
    }
}

/// Advantage of accepting the second gamble, conditioned on each first-stage
/// outcome: `[d_win, d_loss]`.
///
/// For a first outcome `x1`, the second-stage payoffs are shifted by `x1` and
/// weighted `w1 : 1 - w1`; the utility of stopping at `x1` is subtracted.
pub fn utility_differences(model: &Qdim, gamble: &Gamble) -> [f64; 2] {
    let (alpha, lambda, w1) = (model.alpha(), model.lambda(), model.w1());
    let [win2, loss2] = gamble.outcomes2;
    gamble.outcomes1.map(|x1| {
        let stop = utility(x1, alpha, lambda);
        let play = w1 * utility(win2 + x1, alpha, lambda)
            + (1.0 - w1) * utility(loss2 + x1, alpha, lambda);
        play - stop
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_gain_and_loss() {
        assert!((utility(4.0, 0.5, 2.0) - 2.0).abs() < 1e-12);
        assert!((utility(-4.0, 0.5, 2.0) + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_utility_zero_ignores_loss_aversion() {
        assert_eq!(utility(0.0, 0.7, 2.0), 0.0);
        assert_eq!(utility(0.0, 0.7, 100.0), 0.0);
    }

    #[test]
    fn test_utility_fractional_power_of_loss_is_finite() {
        let u = utility(-2.5, 0.3, 1.5);
        assert!(u.is_finite());
        assert!(u < 0.0);
    }

    #[test]
    fn test_differences_linear_model() {
        // α = λ = 1, w1 = 0.75: d = 0.75·2 + 0.25·(-1) = 1.25 on both branches.
        let model = Qdim::new(1.0, 1.0, 0.75, 0.5, 0.0).unwrap();
        let gamble = Gamble::new([2.0, -1.0], [2.0, -1.0]);
        let [d_win, d_loss] = utility_differences(&model, &gamble);
        assert!((d_win - 1.25).abs() < 1e-12);
        assert!((d_loss - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_differences_with_loss_aversion() {
        let model = Qdim::new(0.7, 2.0, 0.5, 0.5, 2.5).unwrap();
        let gamble = Gamble::new([2.0, -1.0], [2.0, -1.0]);
        let [d_win, d_loss] = utility_differences(&model, &gamble);
        // Win branch: 0.5·4^0.7 + 0.5·1 - 2^0.7.
        let expected_win = 0.5 * 4f64.powf(0.7) + 0.5 - 2f64.powf(0.7);
        // Loss branch: 0.5·1 + 0.5·(-2·2^0.7) + 2.
        let expected_loss = 0.5 - 2f64.powf(0.7) + 2.0;
        assert!((d_win - expected_win).abs() < 1e-12);
        assert!((d_loss - expected_loss).abs() < 1e-12);
    }
}
