//! Error type shared by every qdim-core entry point.

use crate::model::Branch;

/// Tolerance used by the numerical invariant checks (Hermiticity of `H`,
/// unitarity of `U`, imaginary residue of projected probabilities).
pub const NUMERICAL_TOLERANCE: f64 = 1e-9;

/// Errors raised by the prediction, sampling and likelihood layers.
///
/// A count observed in a zero-probability category is *not* an error: the
/// log-likelihood is `-inf` in that case.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QdimError {
    /// A model parameter was NaN or infinite.
    #[error("parameter {name} must be a finite number, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    /// The conditional plan probability divides by `P(branch) == 0`.
    #[error("conditional plan probability is undefined: P({branch}) on the neutral state is zero")]
    ZeroProbability { branch: Branch },

    /// An internal invariant of the quantum evolution was violated.
    #[error("numerical consistency violated: {0}")]
    NumericalConsistency(String),

    /// An outcome vector did not have exactly two entries.
    #[error("{which} must have exactly 2 entries [win, loss], got {len}")]
    OutcomeLength { which: &'static str, len: usize },

    /// Parallel batch sequences had different lengths.
    #[error("batch field {field} has {len} entries, expected {expected}")]
    BatchLength {
        field: &'static str,
        len: usize,
        expected: usize,
    },

    /// Observed counts do not add up to the declared trial count.
    #[error("observed counts sum to {total}, expected n = {n}")]
    CountMismatch { total: u64, n: u64 },

    /// Joint response probabilities do not form a distribution.
    #[error("invalid response distribution: {0}")]
    InvalidDistribution(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QdimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_field() {
        let err = QdimError::BatchLength {
            field: "won_first",
            len: 3,
            expected: 4,
        };
        assert_eq!(
            err.to_string(),
            "batch field won_first has 3 entries, expected 4"
        );

        let err = QdimError::ZeroProbability { branch: Branch::Loss };
        assert!(err.to_string().contains("P(loss)"));
    }
}
