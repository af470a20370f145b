//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by operator construction and evolution synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Operator contains no terms.
    #[error("operator is empty — no terms to synthesise")]
    EmptyOperator,

    /// n_steps must be ≥ 1.
    #[error("n_steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// power must be ≥ 1.
    #[error("power must be at least 1, got {0}")]
    InvalidPower(u64),

    /// Suzuki expansion order must be a positive even number.
    #[error("Suzuki expansion order must be a positive even number, got {0}")]
    InvalidExpansionOrder(u32),

    /// The evolution control qubit lies inside the operator's support.
    #[error("control qubit q{0} lies inside the operator's support")]
    ControlInSupport(u32),

    /// A Pauli label contains a character other than I, X, Y, Z.
    #[error("invalid Pauli label character '{0}' (expected I, X, Y or Z)")]
    InvalidPauliLabel(char),

    /// Pauli labels within one operator have different widths.
    #[error("Pauli label width mismatch: expected {expected} characters, got {got}")]
    LabelWidthMismatch {
        /// Width of the first label.
        expected: usize,
        /// Width of the offending label.
        got: usize,
    },

    /// A coefficient with a nonzero imaginary part makes the operator
    /// non-Hermitian.
    #[error("non-Hermitian operator: term '{label}' has imaginary coefficient {imag}")]
    NonHermitian {
        /// Label of the offending term.
        label: String,
        /// The imaginary part.
        imag: f64,
    },

    /// Circuit builder returned an error.
    #[error("circuit IR error: {0}")]
    Ir(#[from] alsvid_ir::IrError),

    /// Operator deserialization failed.
    #[error("operator deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for simulation synthesis operations.
pub type SimResult<T> = Result<T, SimError>;
