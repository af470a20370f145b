//! Local sampling statevector backend for Alsvid.
//!
//! Implements the [`alsvid_hal::Backend`] trait with an in-process
//! statevector simulation. Circuits are evolved once and the requested
//! shots are sampled from the final distribution; all measurements are
//! terminal, so the two are equivalent.
//!
//! Sampling is reproducible via [`SimulatorBackend::with_seed`], which
//! the numerical-validation tests rely on.

pub mod simulator;
pub mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
