//! Initial-state preparation for estimator circuits.

use num_complex::Complex64;

use alsvid_ir::{Circuit, QubitId};

use crate::error::{AlgorithmError, AlgorithmResult};

/// How the system register is prepared before estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialState {
    /// Leave the register in |0…0⟩.
    Zero,
    /// Prepare an arbitrary normalized state.
    ///
    /// Validation suites seed this with the reference oracle's *exact*
    /// eigenvector. That is a test-fixture idealization — a real caller
    /// only ever has an approximate eigenvector — and it isolates the
    /// estimator's phase-readout error from state-preparation error.
    Custom(Vec<Complex64>),
}

impl InitialState {
    /// Build a custom state, normalizing the amplitudes.
    ///
    /// The amplitude count must be a nonzero power of two with nonzero
    /// norm.
    pub fn custom(amplitudes: Vec<Complex64>) -> AlgorithmResult<Self> {
        if amplitudes.is_empty() || !amplitudes.len().is_power_of_two() {
            return Err(AlgorithmError::InvalidInitialState(format!(
                "amplitude count {} is not a power of two",
                amplitudes.len()
            )));
        }
        let norm = amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt();
        if norm < 1e-12 {
            return Err(AlgorithmError::InvalidInitialState(
                "state vector has zero norm".into(),
            ));
        }
        Ok(Self::Custom(
            amplitudes.into_iter().map(|a| a / norm).collect(),
        ))
    }

    /// Number of qubits a custom state spans (`None` for `Zero`).
    pub fn num_qubits(&self) -> Option<u32> {
        match self {
            InitialState::Zero => None,
            InitialState::Custom(amps) => Some(amps.len().trailing_zeros()),
        }
    }

    /// Emit the preparation onto `circuit` for the given register.
    pub fn apply_to(&self, circuit: &mut Circuit, qubits: &[QubitId]) -> AlgorithmResult<()> {
        match self {
            InitialState::Zero => Ok(()),
            InitialState::Custom(amps) => {
                let expected = 1usize << qubits.len();
                if amps.len() != expected {
                    return Err(AlgorithmError::StateDimensionMismatch {
                        got: amps.len(),
                        expected,
                    });
                }
                circuit.initialize(amps.clone(), qubits.iter().copied())?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_normalizes() {
        let state =
            InitialState::custom(vec![Complex64::new(3.0, 0.0), Complex64::new(4.0, 0.0)])
                .unwrap();
        match state {
            InitialState::Custom(amps) => {
                assert!((amps[0].re - 0.6).abs() < 1e-12);
                assert!((amps[1].re - 0.8).abs() < 1e-12);
            }
            InitialState::Zero => panic!("expected Custom"),
        }
    }

    #[test]
    fn test_custom_rejects_non_power_of_two() {
        let err = InitialState::custom(vec![Complex64::new(1.0, 0.0); 3]);
        assert!(matches!(err, Err(AlgorithmError::InvalidInitialState(_))));
    }

    #[test]
    fn test_custom_rejects_zero_norm() {
        let err = InitialState::custom(vec![Complex64::new(0.0, 0.0); 2]);
        assert!(matches!(err, Err(AlgorithmError::InvalidInitialState(_))));
    }

    #[test]
    fn test_apply_to_checks_register_size() {
        let state =
            InitialState::custom(vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)])
                .unwrap();
        let mut circuit = Circuit::with_size("t", 2, 0);
        let err = state.apply_to(&mut circuit, &[QubitId(0), QubitId(1)]);
        assert!(matches!(
            err,
            Err(AlgorithmError::StateDimensionMismatch {
                got: 2,
                expected: 4
            })
        ));
    }

    #[test]
    fn test_zero_state_is_a_noop() {
        let mut circuit = Circuit::with_size("t", 2, 0);
        InitialState::Zero
            .apply_to(&mut circuit, &[QubitId(0), QubitId(1)])
            .unwrap();
        assert!(circuit.is_empty());
    }
}
