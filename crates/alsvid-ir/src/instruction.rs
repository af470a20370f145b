//! Circuit instructions combining operations with operands.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(StandardGate),
    /// Measurement operation.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,
    /// Barrier (synchronization point).
    Barrier,
    /// Prepare the instruction's qubits in an arbitrary normalized state.
    ///
    /// Amplitudes are indexed with the first listed qubit as the least
    /// significant bit. Only meaningful as the first operation touching
    /// the target register.
    Initialize {
        /// 2^k complex amplitudes for the k target qubits.
        amplitudes: Vec<Complex64>,
    },
    /// Execute a block of instructions a fixed number of times.
    ///
    /// The circuit-level analogue of an OpenQASM 3 classical `for` loop.
    /// Keeps `U^(2^k)` evolution circuits O(slice) in memory rather than
    /// materializing every repetition.
    Repeat {
        /// Number of times the body runs.
        times: u64,
        /// The repeated instruction block.
        body: Vec<Instruction>,
    },
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (for measure).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a state-preparation instruction.
    pub fn initialize(
        amplitudes: Vec<Complex64>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> Self {
        Self {
            kind: InstructionKind::Initialize { amplitudes },
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a repeated-block instruction.
    ///
    /// The operand lists record the union of qubits/clbits the body touches.
    pub fn repeat(times: u64, body: Vec<Instruction>) -> Self {
        let mut qubits: Vec<QubitId> = vec![];
        let mut clbits: Vec<ClbitId> = vec![];
        for inst in &body {
            for q in &inst.qubits {
                if !qubits.contains(q) {
                    qubits.push(*q);
                }
            }
            for c in &inst.clbits {
                if !clbits.contains(c) {
                    clbits.push(*c);
                }
            }
        }
        Self {
            kind: InstructionKind::Repeat { times, body },
            qubits,
            clbits,
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
            InstructionKind::Initialize { .. } => "initialize",
            InstructionKind::Repeat { .. } => "repeat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure(QubitId(0), ClbitId(0));
        assert!(inst.is_measure());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.clbits.len(), 1);
    }

    #[test]
    fn test_repeat_collects_operands() {
        let body = vec![
            Instruction::single_qubit_gate(StandardGate::H, QubitId(1)),
            Instruction::two_qubit_gate(StandardGate::CX, QubitId(1), QubitId(2)),
        ];
        let inst = Instruction::repeat(4, body);
        assert_eq!(inst.name(), "repeat");
        assert_eq!(inst.qubits, vec![QubitId(1), QubitId(2)]);
        assert!(inst.clbits.is_empty());
    }

    #[test]
    fn test_initialize_instruction() {
        let amps = vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)];
        let inst = Instruction::initialize(amps, [QubitId(0)]);
        assert_eq!(inst.name(), "initialize");
        assert_eq!(inst.qubits.len(), 1);
    }
}
