//! Joint distribution over (planned, final) responses.

/// Fold the repetition parameter `m` into plan/final acceptance probabilities.
///
/// With probability `m` the final choice repeats the plan; otherwise it is
/// drawn independently with acceptance probability `p_final`. Output order is
/// `[accept/accept, accept/decline, decline/accept, decline/decline]`.
pub fn joint_response(p_plan: f64, p_final: f64, m: f64) -> [f64; 4] {
    let redraw = 1.0 - m;
    [
        p_plan * (m + redraw * p_final),
        p_plan * redraw * (1.0 - p_final),
        (1.0 - p_plan) * redraw * p_final,
        (1.0 - p_plan) * (m + redraw * (1.0 - p_final)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_sums_to_one_on_grid() {
        let grid: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        for &p_plan in &grid {
            for &p_final in &grid {
                for &m in &grid {
                    let joint = joint_response(p_plan, p_final, m);
                    let sum: f64 = joint.iter().sum();
                    assert!((sum - 1.0).abs() < 1e-12, "sum {sum} at {p_plan},{p_final},{m}");
                    assert!(joint.iter().all(|&p| (-1e-12..=1.0 + 1e-12).contains(&p)));
                }
            }
        }
    }

    #[test]
    fn test_full_repetition() {
        let joint = joint_response(0.3, 0.9, 1.0);
        assert_eq!(joint[1], 0.0);
        assert_eq!(joint[2], 0.0);
        assert!((joint[0] - 0.3).abs() < 1e-15);
        assert!((joint[3] - 0.7).abs() < 1e-15);
    }

    #[test]
    fn test_no_repetition_is_independent() {
        let joint = joint_response(0.4, 0.25, 0.0);
        assert!((joint[0] - 0.4 * 0.25).abs() < 1e-15);
        assert!((joint[1] - 0.4 * 0.75).abs() < 1e-15);
        assert!((joint[2] - 0.6 * 0.25).abs() < 1e-15);
        assert!((joint[3] - 0.6 * 0.75).abs() < 1e-15);
    }
}
