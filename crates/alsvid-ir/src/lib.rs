//! Alsvid circuit intermediate representation.
//!
//! Core data structures for representing quantum circuits: typed qubit and
//! classical-bit identifiers, a concrete-angle standard gate set, and an
//! instruction-list [`Circuit`] with a fluent builder API.
//!
//! Two instruction kinds go beyond plain gate lists because the phase
//! estimation stack needs them:
//!
//! - `Initialize` — arbitrary state preparation for a target register,
//!   used to seed an estimator with an approximate eigenvector.
//! - `Repeat` — a fixed-count instruction block (the OpenQASM 3 `for`
//!   loop shape), so that `controlled-U^(2^k)` evolution circuits stay
//!   proportional to one Trotter slice in memory.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 4);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
