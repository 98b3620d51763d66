//! Hamiltonians over the basis {win&accept, win&decline, lose&accept, lose&decline}.

use nalgebra::Matrix4;

/// Real symmetric 4×4 operator.
pub type Operator = Matrix4<f64>;

/// Belief-rotation Hamiltonian `H1`.
///
/// Block-diagonal: the win block rotates toward "accept" in proportion to
/// `tanh(d_win / 2)`, the loss block likewise with `d_loss`. Each block has
/// zero trace and unit-norm rows.
pub fn make_h1(d_win: f64, d_loss: f64) -> Operator {
    let [a, b] = rotation_block(d_win);
    let [c, d] = rotation_block(d_loss);
    #[rustfmt::skip]
    let h = Operator::new(
        a,   b,   0.0, 0.0,
        b,   -a,  0.0, 0.0,
        0.0, 0.0, c,   d,
        0.0, 0.0, d,   -c,
    );
    h
}

/// `[h/√(1+h²), 1/√(1+h²)]` with `h = tanh(d/2)`.
fn rotation_block(d: f64) -> [f64; 2] {
    let h = (0.5 * d).tanh();
    let norm = (1.0 + h * h).sqrt();
    [h / norm, 1.0 / norm]
}

/// Entanglement Hamiltonian `H2`, coupling "won first gamble" with
/// "accept second gamble".
pub fn make_h2(gamma: f64) -> Operator {
    let v = -gamma / std::f64::consts::SQRT_2;
    #[rustfmt::skip]
    let h = Operator::new(
        v,   0.0, v,   0.0,
        0.0, -v,  0.0, v,
        v,   0.0, -v,  0.0,
        0.0, v,   0.0, v,
    );
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric(h: &Operator) {
        assert_eq!(*h, h.transpose(), "operator is not symmetric");
    }

    #[test]
    fn test_h1_symmetric_and_traceless_blocks() {
        for &(dw, dl) in &[
            (0.0, 0.0),
            (1.25, -1.25),
            (0.195, 0.8755),
            (40.0, -40.0),
            (-1e-8, 3.0),
        ] {
            let h = make_h1(dw, dl);
            assert_symmetric(&h);
            assert!((h[(0, 0)] + h[(1, 1)]).abs() < 1e-15);
            assert!((h[(2, 2)] + h[(3, 3)]).abs() < 1e-15);
            assert_eq!(h[(0, 2)], 0.0);
            assert_eq!(h[(1, 3)], 0.0);
        }
    }

    #[test]
    fn test_h1_rows_are_unit_norm() {
        let h = make_h1(2.0, -0.3);
        for r in 0..4 {
            assert!((h.row(r).norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_h1_saturates() {
        let h = make_h1(1e6, -1e6);
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!((h[(0, 0)] - s).abs() < 1e-12);
        assert!((h[(2, 2)] + s).abs() < 1e-12);
    }

    #[test]
    fn test_h2_pattern() {
        for &gamma in &[0.0, 1.74, -2.5, 100.0] {
            let h = make_h2(gamma);
            assert_symmetric(&h);
            let v = -gamma / 2f64.sqrt();
            assert_eq!(h[(0, 0)], v);
            assert_eq!(h[(1, 1)], -v);
            assert_eq!(h[(2, 2)], -v);
            assert_eq!(h[(3, 3)], v);
            assert_eq!(h[(0, 2)], v);
            assert_eq!(h[(1, 3)], v);
            assert_eq!(h[(0, 1)], 0.0);
        }
    }
}
