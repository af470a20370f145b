//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// What a backend can execute.
///
/// Capabilities are cached at backend construction so that introspection
/// is synchronous and infallible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Maximum register width.
    pub num_qubits: u32,
    /// True for simulated backends.
    pub is_simulator: bool,
    /// True if the backend accepts arbitrary state-preparation
    /// (`Initialize`) instructions.
    pub supports_initialize: bool,
}

impl Capabilities {
    /// Capabilities of a local statevector simulator of the given width.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            is_simulator: true,
            supports_initialize: true,
        }
    }
}
