//! Pauli-string exponentiation.
//!
//! Implements the standard gate synthesis for
//!
//!   exp(-i · coeff · t · P)
//!
//! where P is a tensor product of Pauli operators, using the circuit identity:
//!
//!   exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CNOT_ladder · Rz(θ) · CNOT_ladder†
//!
//! with basis rotations applied before/after to handle X and Y factors:
//!   X → H · Z · H
//!   Y → Sdg · H · Z · H · S
//!   Z → identity
//!
//! The controlled variant swaps the central Rz(θ) for a CRz(θ) on the
//! ancilla; the flanking gates cancel on their own when the control is
//! |0⟩. An identity string, a pure global phase in the uncontrolled
//! case, becomes a relative phase on the ancilla and is synthesised as
//! a phase gate there.

use alsvid_ir::{Circuit, QubitId};

use crate::error::SimResult;
use crate::pauli::{PauliOp, PauliTerm};

/// Append the circuit for `exp(-i · coeff · t · P)` to `circuit`.
///
/// If the Pauli string is the identity operator the function is a no-op
/// (global phase — unobservable).
pub fn append_exp_pauli(circuit: &mut Circuit, term: &PauliTerm, t: f64) -> SimResult<()> {
    let ops = term.pauli.ops();
    if ops.is_empty() {
        // Pure global phase — nothing to do.
        return Ok(());
    }

    // θ = 2 · coeff · t  (Rz(θ) implements exp(-i θ/2 Z))
    let theta = 2.0 * term.coeff * t;

    basis_change(circuit, ops, false)?;

    let qubits: Vec<u32> = ops.iter().map(|(q, _)| *q).collect();
    cnot_ladder(circuit, &qubits)?;

    let target = QubitId(*qubits.last().expect("non-empty checked above"));
    circuit.rz(theta, target)?;

    cnot_ladder_reverse(circuit, &qubits)?;
    basis_change(circuit, ops, true)?;

    Ok(())
}

/// Append the circuit for `control ? exp(-i · coeff · t · P) : 1`.
///
/// An identity string contributes `exp(-i · coeff · t)` — a relative
/// phase on the control qubit, synthesised as `P(-coeff·t)` there.
pub fn append_exp_pauli_controlled(
    circuit: &mut Circuit,
    term: &PauliTerm,
    t: f64,
    control: QubitId,
) -> SimResult<()> {
    let ops = term.pauli.ops();
    if ops.is_empty() {
        circuit.p(-term.coeff * t, control)?;
        return Ok(());
    }

    let theta = 2.0 * term.coeff * t;

    basis_change(circuit, ops, false)?;

    let qubits: Vec<u32> = ops.iter().map(|(q, _)| *q).collect();
    cnot_ladder(circuit, &qubits)?;

    let target = QubitId(*qubits.last().expect("non-empty checked above"));
    circuit.crz(theta, control, target)?;

    cnot_ladder_reverse(circuit, &qubits)?;
    basis_change(circuit, ops, true)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Apply basis-change gates for each Pauli operator.
///
/// For the forward pass (`undo = false`):
///   X → H
///   Y → Sdg · H
///   Z → (nothing)
///
/// For the reverse pass (`undo = true`):
///   X → H  (H is self-inverse)
///   Y → H · S
///   Z → (nothing)
fn basis_change(circuit: &mut Circuit, ops: &[(u32, PauliOp)], undo: bool) -> SimResult<()> {
    for &(q, op) in ops {
        let qid = QubitId(q);
        match (op, undo) {
            (PauliOp::X, _) => {
                circuit.h(qid)?;
            }
            (PauliOp::Y, false) => {
                circuit.sdg(qid)?;
                circuit.h(qid)?;
            }
            (PauliOp::Y, true) => {
                circuit.h(qid)?;
                circuit.s(qid)?;
            }
            (PauliOp::Z | PauliOp::I, _) => {}
        }
    }
    Ok(())
}

/// Apply a forward CNOT ladder: CX(q[0],q[1]), CX(q[1],q[2]), …
///
/// The ladder parity-encodes the XOR of all qubits into the last qubit,
/// enabling a single Rz to implement the tensor-product Pauli rotation.
fn cnot_ladder(circuit: &mut Circuit, qubits: &[u32]) -> SimResult<()> {
    for window in qubits.windows(2) {
        circuit.cx(QubitId(window[0]), QubitId(window[1]))?;
    }
    Ok(())
}

/// Apply the reverse CNOT ladder (the forward ladder run backwards).
fn cnot_ladder_reverse(circuit: &mut Circuit, qubits: &[u32]) -> SimResult<()> {
    for window in qubits.windows(2).rev() {
        circuit.cx(QubitId(window[0]), QubitId(window[1]))?;
    }
    Ok(())
}
