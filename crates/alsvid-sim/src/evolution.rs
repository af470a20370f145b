//! Product-formula time-evolution synthesis.
//!
//! Approximates `exp(-i H t)` by splitting the evolution into `n_steps`
//! slices, each evolved exactly under each term in sequence.
//!
//! # First-order Trotter (Lie-Trotter)
//!
//!   exp(-i H t) ≈ [∏_k exp(-i c_k P_k t/n)]^n
//!
//! Error: O(t² / n).
//!
//! # Suzuki-Trotter
//!
//! Order 2 is the symmetric product
//!
//!   S₂(τ) = [∏_k exp(-i c_k P_k τ/2)] · [∏_{k rev} exp(-i c_k P_k τ/2)]
//!
//! with error O(t³ / n²); higher even orders follow the fractal recursion
//!
//!   S_{2j}(τ) = S_{2j-2}(p_j τ)² · S_{2j-2}((1-4p_j)τ) · S_{2j-2}(p_j τ)²
//!   p_j = 1 / (4 - 4^{1/(2j-1)})
//!
//! # Powers
//!
//! Phase estimation needs `U^(2^k)` for U = exp(-i H t). Raising to the
//! power `p` keeps the slice width `t/n_steps` and runs the slice block
//! `n_steps · p` times, so the per-slice error is independent of the
//! power. The block is emitted once inside a `Repeat` instruction.

use alsvid_ir::{Circuit, QubitId};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::pauli::PauliOperator;
use crate::synthesis::{append_exp_pauli, append_exp_pauli_controlled};

/// Product-formula family used to expand the evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionMode {
    /// First-order Lie-Trotter product formula.
    Trotter,
    /// Symmetric Suzuki-Trotter formula of the given even order.
    Suzuki {
        /// Expansion order; must be a positive even number.
        order: u32,
    },
}

/// Time-evolution synthesiser for `exp(-i H t)^power`.
pub struct PauliEvolution {
    operator: PauliOperator,
    /// Evolution time t per power unit.
    t: f64,
    /// Number of slices per power unit.
    n_steps: usize,
    /// Repetition count for `U^power`.
    power: u64,
    mode: ExpansionMode,
}

impl PauliEvolution {
    /// Construct a new synthesiser for `exp(-i H t)`.
    ///
    /// # Arguments
    /// * `operator` — the Hermitian operator H = Σ c_k P_k
    /// * `t`        — evolution time per power unit
    /// * `n_steps`  — number of slices per power unit (higher → more accurate)
    pub fn new(operator: PauliOperator, t: f64, n_steps: usize) -> Self {
        Self {
            operator,
            t,
            n_steps,
            power: 1,
            mode: ExpansionMode::Trotter,
        }
    }

    /// Raise the evolution to a power: synthesise `U^power`.
    #[must_use]
    pub fn with_power(mut self, power: u64) -> Self {
        self.power = power;
        self
    }

    /// Select the product-formula expansion.
    #[must_use]
    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Synthesise the evolution as a standalone circuit.
    pub fn circuit(&self) -> SimResult<Circuit> {
        let mut circuit = Circuit::with_size("evolution", self.operator.num_qubits(), 0);
        self.append(&mut circuit)?;
        Ok(circuit)
    }

    /// Append the evolution to an existing circuit.
    pub fn append(&self, circuit: &mut Circuit) -> SimResult<()> {
        self.validate(None)?;
        let slice = self.slice_block(circuit, None)?;
        self.emit(circuit, slice)
    }

    /// Append the ancilla-controlled evolution to an existing circuit.
    ///
    /// The control qubit must lie outside the operator's support. Identity
    /// terms become phase gates on the control, so the controlled evolution
    /// carries the operator's full spectrum, not just its traceless part.
    pub fn append_controlled(&self, circuit: &mut Circuit, control: QubitId) -> SimResult<()> {
        self.validate(Some(control))?;
        let slice = self.slice_block(circuit, Some(control))?;
        self.emit(circuit, slice)
    }

    fn emit(&self, circuit: &mut Circuit, slice: Circuit) -> SimResult<()> {
        let times = self.n_steps as u64 * self.power;
        debug!(
            n_terms = self.operator.n_terms(),
            n_steps = self.n_steps,
            power = self.power,
            mode = ?self.mode,
            slice_gates = slice.len(),
            "synthesising product-formula evolution"
        );
        circuit.repeat(times, slice)?;
        Ok(())
    }

    /// Build one slice of the product formula as a sub-circuit block.
    fn slice_block(&self, parent: &Circuit, control: Option<QubitId>) -> SimResult<Circuit> {
        let dt = self.t / self.n_steps as f64;
        let mut block = Circuit::with_size("slice", parent.num_qubits() as u32, 0);
        for (idx, tau) in self.slice_schedule(dt) {
            let term = &self.operator.terms()[idx];
            match control {
                Some(ancilla) => append_exp_pauli_controlled(&mut block, term, tau, ancilla)?,
                None => append_exp_pauli(&mut block, term, tau)?,
            }
        }
        Ok(block)
    }

    /// The (term index, time) application schedule for one slice.
    fn slice_schedule(&self, dt: f64) -> Vec<(usize, f64)> {
        let n = self.operator.n_terms();
        let mut schedule = vec![];
        match self.mode {
            ExpansionMode::Trotter => {
                for k in 0..n {
                    schedule.push((k, dt));
                }
            }
            ExpansionMode::Suzuki { order } => {
                suzuki_schedule(n, order, dt, &mut schedule);
            }
        }
        schedule
    }

    fn validate(&self, control: Option<QubitId>) -> SimResult<()> {
        if self.operator.n_terms() == 0 {
            return Err(SimError::EmptyOperator);
        }
        if self.n_steps == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        if self.power == 0 {
            return Err(SimError::InvalidPower(0));
        }
        if let ExpansionMode::Suzuki { order } = self.mode {
            if order == 0 || order % 2 != 0 {
                return Err(SimError::InvalidExpansionOrder(order));
            }
        }
        if let Some(ancilla) = control {
            if ancilla.0 < self.operator.num_qubits() {
                return Err(SimError::ControlInSupport(ancilla.0));
            }
        }
        Ok(())
    }
}

/// Recursive Suzuki schedule construction.
fn suzuki_schedule(n_terms: usize, order: u32, dt: f64, out: &mut Vec<(usize, f64)>) {
    if order == 2 {
        for k in 0..n_terms {
            out.push((k, dt / 2.0));
        }
        for k in (0..n_terms).rev() {
            out.push((k, dt / 2.0));
        }
    } else {
        let p = 1.0 / (4.0 - 4.0_f64.powf(1.0 / (f64::from(order) - 1.0)));
        for _ in 0..2 {
            suzuki_schedule(n_terms, order - 2, p * dt, out);
        }
        suzuki_schedule(n_terms, order - 2, (1.0 - 4.0 * p) * dt, out);
        for _ in 0..2 {
            suzuki_schedule(n_terms, order - 2, p * dt, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pauli::PauliTerm;

    fn zz_x() -> PauliOperator {
        PauliOperator::from_terms(vec![
            PauliTerm::zz(0, 1, -1.0),
            PauliTerm::x(0, -0.5),
            PauliTerm::x(1, -0.5),
        ])
    }

    #[test]
    fn test_suzuki_schedule_order_2_is_symmetric() {
        let mut schedule = vec![];
        suzuki_schedule(3, 2, 1.0, &mut schedule);
        let indices: Vec<_> = schedule.iter().map(|(k, _)| *k).collect();
        assert_eq!(indices, vec![0, 1, 2, 2, 1, 0]);
        assert!(schedule.iter().all(|(_, t)| (*t - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_suzuki_schedule_times_sum_to_dt() {
        for order in [2, 4, 6] {
            let mut schedule = vec![];
            suzuki_schedule(2, order, 0.8, &mut schedule);
            // Each term's total applied time equals dt.
            for term in 0..2 {
                let total: f64 = schedule
                    .iter()
                    .filter(|(k, _)| *k == term)
                    .map(|(_, t)| *t)
                    .sum();
                assert!((total - 0.8).abs() < 1e-12, "order {order}");
            }
        }
    }

    #[test]
    fn test_empty_operator_rejected() {
        let evol = PauliEvolution::new(PauliOperator::from_terms(vec![]), 1.0, 1);
        assert!(matches!(evol.circuit(), Err(SimError::EmptyOperator)));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let evol = PauliEvolution::new(zz_x(), 1.0, 0);
        assert!(matches!(evol.circuit(), Err(SimError::InvalidSteps(0))));
    }

    #[test]
    fn test_zero_power_rejected() {
        let evol = PauliEvolution::new(zz_x(), 1.0, 1).with_power(0);
        assert!(matches!(evol.circuit(), Err(SimError::InvalidPower(0))));
    }

    #[test]
    fn test_odd_suzuki_order_rejected() {
        let evol = PauliEvolution::new(zz_x(), 1.0, 1).with_mode(ExpansionMode::Suzuki { order: 3 });
        assert!(matches!(
            evol.circuit(),
            Err(SimError::InvalidExpansionOrder(3))
        ));
    }

    #[test]
    fn test_circuit_width_and_repetition() {
        let evol = PauliEvolution::new(zz_x(), 1.0, 10).with_power(4);
        let circuit = evol.circuit().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        // One Repeat instruction holding the slice.
        assert_eq!(circuit.len(), 1);
        let inst = circuit.instructions().next().unwrap();
        match &inst.kind {
            alsvid_ir::InstructionKind::Repeat { times, .. } => assert_eq!(*times, 40),
            other => panic!("expected Repeat, got {other:?}"),
        }
    }

    #[test]
    fn test_suzuki_slice_is_deeper_than_trotter() {
        let c1 = PauliEvolution::new(zz_x(), 1.0, 1).circuit().unwrap();
        let c2 = PauliEvolution::new(zz_x(), 1.0, 1)
            .with_mode(ExpansionMode::Suzuki { order: 2 })
            .circuit()
            .unwrap();
        assert!(c2.expanded_len() > c1.expanded_len());
    }

    #[test]
    fn test_control_inside_support_rejected() {
        let mut circuit = Circuit::with_size("t", 3, 0);
        let evol = PauliEvolution::new(zz_x(), 1.0, 1);
        assert!(matches!(
            evol.append_controlled(&mut circuit, QubitId(1)),
            Err(SimError::ControlInSupport(1))
        ));
    }

    #[test]
    fn test_controlled_includes_identity_phase() {
        let op = PauliOperator::from_terms(vec![
            PauliTerm::identity(0.25),
            PauliTerm::z(0, 0.5),
        ]);
        let mut circuit = Circuit::with_size("t", 2, 0);
        PauliEvolution::new(op, 1.0, 1)
            .append_controlled(&mut circuit, QubitId(1))
            .unwrap();
        let inst = circuit.instructions().next().unwrap();
        match &inst.kind {
            alsvid_ir::InstructionKind::Repeat { body, .. } => {
                let names: Vec<_> = body.iter().map(|i| i.name()).collect();
                assert!(names.contains(&"p"));
                assert!(names.contains(&"crz"));
            }
            other => panic!("expected Repeat, got {other:?}"),
        }
    }
}
