//! Unitary evolution of the cognitive state and projective measurement.
//!
//! The generator `H = H1 + H2` is real symmetric, so the evolution operator is
//! built from its spectral decomposition `H = V·diag(λ)·Vᵀ`:
//!
//! ```text
//! U = exp(-i·t·H) = V · diag(exp(-i·t·λ_k)) · Vᵀ
//! ```
//!
//! which is exactly unitary up to the orthogonality of `V`. Both Hermiticity of
//! `H` and unitarity of `U` are checked and reported as
//! [`QdimError::NumericalConsistency`] when violated.

use nalgebra::{Matrix4, SymmetricEigen, Vector4};
use num_complex::Complex64;

use crate::error::{NUMERICAL_TOLERANCE, QdimError, Result};
use crate::hamiltonian::Operator;

/// Complex 4×4 operator.
pub type Unitary = Matrix4<Complex64>;
/// Complex amplitude vector over the four basis states.
pub type State = Vector4<Complex64>;

/// Decision duration used unless a caller overrides it.
pub const DEFAULT_DECISION_TIME: f64 = std::f64::consts::FRAC_PI_2;

/// Compute `U = exp(-i·t·H)` for a real symmetric `H`.
pub fn evolution_operator(h: &Operator, t: f64) -> Result<Unitary> {
    let asymmetry = (h - h.transpose()).norm();
    if !(asymmetry <= NUMERICAL_TOLERANCE) {
        return Err(QdimError::NumericalConsistency(format!(
            "Hamiltonian is not Hermitian (‖H - Hᵀ‖ = {asymmetry:e})"
        )));
    }

    let eigen = SymmetricEigen::new(*h);
    let v = eigen.eigenvectors.map(|x| Complex64::new(x, 0.0));
    let phases = eigen
        .eigenvalues
        .map(|lambda| Complex64::from_polar(1.0, -t * lambda));
    let u = v * Unitary::from_diagonal(&phases) * v.transpose();

    let defect = (u.adjoint() * u - Unitary::identity()).norm();
    if !(defect <= NUMERICAL_TOLERANCE) {
        return Err(QdimError::NumericalConsistency(format!(
            "evolution operator is not unitary (‖U†U - I‖ = {defect:e})"
        )));
    }
    Ok(u)
}

fn real_state(amplitudes: [f64; 4]) -> State {
    State::from_iterator(amplitudes.into_iter().map(|a| Complex64::new(a, 0.0)))
}

/// State after observing a win on the first gamble.
pub fn win_state() -> State {
    let a = 0.5f64.sqrt();
    real_state([a, a, 0.0, 0.0])
}

/// State after observing a loss on the first gamble.
pub fn loss_state() -> State {
    let a = 0.5f64.sqrt();
    real_state([0.0, 0.0, a, a])
}

/// State while the first-gamble outcome is still unknown (planning).
pub fn neutral_state() -> State {
    real_state([0.5; 4])
}

/// Diagonal 0/1 projector selecting a subset of basis states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projector([bool; 4]);

impl Projector {
    /// Accept the second gamble, either first outcome.
    pub const ACCEPT: Self = Self([true, false, true, false]);
    /// Won the first gamble and accept.
    pub const ACCEPT_WIN: Self = Self([true, false, false, false]);
    /// Lost the first gamble and accept.
    pub const ACCEPT_LOSS: Self = Self([false, false, true, false]);
    /// Won the first gamble.
    pub const WIN: Self = Self([true, true, false, false]);
    /// Lost the first gamble.
    pub const LOSS: Self = Self([false, false, true, true]);

    pub const fn new(mask: [bool; 4]) -> Self {
        Self(mask)
    }

    pub fn apply(&self, psi: &State) -> State {
        let mut out = *psi;
        for (amp, keep) in out.iter_mut().zip(self.0) {
            if !keep {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        out
    }
}

/// `Re((P·U·ψ)ᴴ(P·U·ψ))`, failing if the imaginary residue exceeds tolerance.
pub fn projection_probability(u: &Unitary, projector: Projector, psi: &State) -> Result<f64> {
    let projected = projector.apply(&(u * psi));
    let inner = projected.dotc(&projected);
    if inner.im.abs() > NUMERICAL_TOLERANCE {
        return Err(QdimError::NumericalConsistency(format!(
            "projected probability has imaginary part {:e}",
            inner.im
        )));
    }
    Ok(inner.re)
}
