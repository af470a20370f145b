//! Error types for the algorithms crate.

use thiserror::Error;

/// Errors produced by algorithm configuration and execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgorithmError {
    /// Operator contains no terms (or only zero coefficients).
    #[error("operator is empty — nothing to solve")]
    EmptyOperator,

    /// Requested eigenpair count is out of range for the operator.
    #[error("requested {k} eigenpairs but the operator dimension is {dim}")]
    InvalidEigenCount {
        /// Number of eigenpairs requested.
        k: usize,
        /// Dimension of the operator matrix.
        dim: usize,
    },

    /// Jacobi diagonalization failed to converge.
    #[error("eigensolver failed to converge within {0} sweeps")]
    NoConvergence(usize),

    /// Iteration count is out of range.
    #[error("num_iterations must be in 1..={max}, got {got}")]
    InvalidIterations {
        /// The rejected iteration count.
        got: usize,
        /// Largest supported iteration count.
        max: usize,
    },

    /// Time-slice count must be ≥ 1.
    #[error("num_time_slices must be at least 1, got {0}")]
    InvalidTimeSlices(usize),

    /// Initial-state amplitudes are malformed.
    #[error("invalid initial state: {0}")]
    InvalidInitialState(String),

    /// Initial state does not match the operator's register.
    #[error("initial state has {got} amplitudes but the register requires {expected}")]
    StateDimensionMismatch {
        /// Number of amplitudes provided.
        got: usize,
        /// Number of amplitudes required.
        expected: usize,
    },

    /// Shot count must be ≥ 1.
    #[error("shots must be at least 1")]
    InvalidShots,

    /// Evolution synthesis failed.
    #[error(transparent)]
    Sim(#[from] alsvid_sim::SimError),

    /// Circuit construction failed.
    #[error(transparent)]
    Ir(#[from] alsvid_ir::IrError),

    /// Backend execution failed.
    #[error(transparent)]
    Hal(#[from] alsvid_hal::HalError),
}

/// Result type for algorithm operations.
pub type AlgorithmResult<T> = Result<T, AlgorithmError>;
