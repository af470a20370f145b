//! `alsvid-sim` — Pauli operators and Hamiltonian time-evolution synthesis.
//!
//! Provides the Hermitian operator model (weighted sums of Pauli strings,
//! dense materialization, the affine spectrum transform phase estimation
//! needs) and converts such operators into `alsvid_ir::Circuit`s that
//! approximate `exp(-i H t)` — plain or ancilla-controlled — using
//! Trotter and Suzuki-Trotter product formulas.
//!
//! # Quick start
//!
//! ```rust
//! use alsvid_sim::evolution::{ExpansionMode, PauliEvolution};
//! use alsvid_sim::pauli::{PauliOperator, PauliTerm};
//!
//! // Transverse-field Ising model: H = -J·ZZ - h·X
//! let h = PauliOperator::from_terms(vec![
//!     PauliTerm::zz(0, 1, -1.0),
//!     PauliTerm::x(0, -0.5),
//!     PauliTerm::x(1, -0.5),
//! ]);
//!
//! let circuit = PauliEvolution::new(h, 1.0, 10)
//!     .with_mode(ExpansionMode::Suzuki { order: 2 })
//!     .circuit()
//!     .unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! ```

pub mod error;
pub mod evolution;
pub mod pauli;
pub mod synthesis;

pub use error::{SimError, SimResult};
pub use evolution::{ExpansionMode, PauliEvolution};
pub use pauli::{PauliOp, PauliOperator, PauliString, PauliTerm};
