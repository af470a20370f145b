//! Iterative quantum phase estimation (IQPE).
//!
//! Estimates the smallest eigenvalue of a Hermitian operator one binary
//! digit at a time, using a single ancilla qubit instead of a full phase
//! register (Kitaev-style iteration with classical feedback).
//!
//! # Spectrum mapping
//!
//! The operator's spectrum is first mapped into [0, 1] so every
//! eigenvalue is representable as a binary fraction:
//!
//!   translation = Σ |c_k|,   stretch = 0.5 / translation,
//!   H′ = (H + translation·I) · stretch
//!
//! Since ‖H‖ ≤ Σ|c_k|, every eigenvalue λ of H maps to
//! λ′ = (λ + translation)·stretch ∈ [0, 1].
//!
//! # Iteration
//!
//! With U = exp(2πi·H′) and the register seeded with an (approximate)
//! eigenvector, iteration k = m…1 measures fraction bit x_k:
//!
//! 1. ancilla into |+⟩,
//! 2. controlled-U^(2^(k-1)) — product-formula synthesis,
//! 3. ancilla phase P(-2πω) cancelling the already-measured lower bits,
//! 4. Hadamard, measure, majority vote over the shot counts.
//!
//! After m iterations the accumulated fraction 0.x₁x₂…x_m estimates λ′
//! with resolution 2^(-m); the estimate is mapped back through the
//! affine transform to report an eigenvalue of H.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use alsvid_ir::{Circuit, ClbitId, QubitId};
use alsvid_sim::{ExpansionMode, PauliEvolution, PauliOperator};

use crate::error::{AlgorithmError, AlgorithmResult};
use crate::initial_state::InitialState;
use crate::instance::QuantumInstance;

/// Iteration counts above this would overflow the `u64` evolution power.
const MAX_ITERATIONS: usize = 48;

/// Iterative phase-estimation eigenvalue estimator.
pub struct IterativePhaseEstimation {
    operator: PauliOperator,
    initial_state: InitialState,
    num_time_slices: usize,
    num_iterations: usize,
    expansion: ExpansionMode,
}

/// The outcome of one estimation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseEstimationResult {
    /// Estimated eigenvalue of the input operator.
    pub energy: f64,
    /// Measured phase bits, most significant first.
    pub top_measurement_label: String,
    /// The measured phase as a binary fraction in [0, 1).
    pub top_measurement_decimal: f64,
    /// Affine scale applied to the spectrum before estimation.
    pub stretch: f64,
    /// Affine shift applied to the spectrum before estimation.
    pub translation: f64,
}

impl IterativePhaseEstimation {
    /// Configure an estimation run.
    ///
    /// # Arguments
    /// * `operator`        — the Hermitian operator whose eigenvalue is sought
    /// * `initial_state`   — system-register preparation (ideally close to
    ///   the target eigenvector)
    /// * `num_time_slices` — product-formula slices per unit power
    /// * `num_iterations`  — number of phase bits to resolve; precision
    ///   improves geometrically with more iterations
    pub fn new(
        operator: PauliOperator,
        initial_state: InitialState,
        num_time_slices: usize,
        num_iterations: usize,
    ) -> AlgorithmResult<Self> {
        if operator.n_terms() == 0 || operator.lambda() == 0.0 {
            return Err(AlgorithmError::EmptyOperator);
        }
        if num_time_slices == 0 {
            return Err(AlgorithmError::InvalidTimeSlices(0));
        }
        if num_iterations == 0 || num_iterations > MAX_ITERATIONS {
            return Err(AlgorithmError::InvalidIterations {
                got: num_iterations,
                max: MAX_ITERATIONS,
            });
        }
        if let Some(n) = initial_state.num_qubits() {
            let expected = 1usize << operator.num_qubits();
            let got = 1usize << n;
            if got != expected {
                return Err(AlgorithmError::StateDimensionMismatch { got, expected });
            }
        }
        Ok(Self {
            operator,
            initial_state,
            num_time_slices,
            num_iterations,
            expansion: ExpansionMode::Trotter,
        })
    }

    /// Select the product-formula expansion (default: first-order Trotter).
    #[must_use]
    pub fn with_expansion(mut self, expansion: ExpansionMode) -> Self {
        self.expansion = expansion;
        self
    }

    /// Run the estimation against the given execution context.
    ///
    /// One attempt per call; sampling noise is inherent and there is no
    /// retry policy.
    pub async fn run(&self, instance: &QuantumInstance) -> AlgorithmResult<PhaseEstimationResult> {
        let translation = self.operator.lambda();
        let stretch = 0.5 / translation;
        let transformed = self.operator.scaled_shifted(stretch, translation);

        info!(
            num_iterations = self.num_iterations,
            num_time_slices = self.num_time_slices,
            stretch,
            translation,
            "starting iterative phase estimation"
        );

        let mut omega: f64 = 0.0;
        let mut label = String::with_capacity(self.num_iterations);

        for k in (1..=self.num_iterations).rev() {
            omega /= 2.0;

            let circuit = self.iteration_circuit(k, omega, &transformed)?;
            let job_id = instance
                .backend()
                .submit(&circuit, instance.shots())
                .await?;
            let result = instance.backend().wait(&job_id).await?;

            let ones = result.counts.get("1");
            let zeros = result.counts.get("0");
            let bit = ones > zeros;

            debug!(iteration = k, ones, zeros, bit = u8::from(bit), "measured phase bit");

            label.insert(0, if bit { '1' } else { '0' });
            if bit {
                omega += 0.5;
            }
        }

        // omega now holds 0.x₁x₂…x_m.
        let decimal = omega;
        let energy = decimal / stretch - translation;

        info!(energy, label = %label, "estimation complete");

        Ok(PhaseEstimationResult {
            energy,
            top_measurement_label: label,
            top_measurement_decimal: decimal,
            stretch,
            translation,
        })
    }

    /// Build the circuit for iteration k with feedback phase ω.
    fn iteration_circuit(
        &self,
        k: usize,
        omega: f64,
        transformed: &PauliOperator,
    ) -> AlgorithmResult<Circuit> {
        let n = self.operator.num_qubits();
        let ancilla = QubitId(n);
        let system: Vec<QubitId> = (0..n).map(QubitId).collect();

        let mut circuit = Circuit::with_size(format!("iqpe_k{k}"), n + 1, 1);
        self.initial_state.apply_to(&mut circuit, &system)?;
        circuit.h(ancilla)?;

        // controlled-U^(2^(k-1)) with U = exp(2πi·H′) = exp(-i·H′·(-2π)).
        PauliEvolution::new(transformed.clone(), -2.0 * PI, self.num_time_slices)
            .with_mode(self.expansion)
            .with_power(1u64 << (k - 1))
            .append_controlled(&mut circuit, ancilla)?;

        if omega != 0.0 {
            circuit.p(-2.0 * PI * omega, ancilla)?;
        }

        circuit.h(ancilla)?;
        circuit.measure(ancilla, ClbitId(0))?;
        Ok(circuit)
    }
}
