//! Quantum algorithms for Alsvid.
//!
//! Two algorithms and the plumbing to compare them:
//!
//! - [`ExactEigensolver`] — classical dense diagonalization of a Pauli
//!   operator, the reference oracle.
//! - [`IterativePhaseEstimation`] — single-ancilla iterative phase
//!   estimation against a sampling backend, the estimator under test.
//!
//! The intended validation pattern runs the oracle first, seeds the
//! estimator's [`InitialState`] with the oracle's eigenvector, and
//! asserts agreement of the estimated energy with the exact eigenvalue
//! to a tolerance set by the iteration budget.
//!
//! ```ignore
//! let exact = ExactEigensolver::new(operator.clone(), 1)?.run()?;
//! let state = InitialState::custom(exact.eigenvectors[0].to_vec())?;
//! let iqpe = IterativePhaseEstimation::new(operator, state, 50, 12)?
//!     .with_expansion(ExpansionMode::Suzuki { order: 2 });
//! let result = iqpe.run(&instance).await?;
//! assert!((result.energy - exact.eigenvalues[0]).abs() < tolerance);
//! ```

pub mod eigensolver;
pub mod error;
pub mod initial_state;
pub mod instance;
pub mod iqpe;
pub mod molecules;
pub mod readout;

pub use eigensolver::{EigensolverResult, ExactEigensolver};
pub use error::{AlgorithmError, AlgorithmResult};
pub use initial_state::InitialState;
pub use instance::QuantumInstance;
pub use iqpe::{IterativePhaseEstimation, PhaseEstimationResult};
pub use readout::{binary_fraction_to_decimal, decimal_to_binary_fraction};
