//! Molecular Hamiltonian fixtures.
//!
//! Qubit operators pre-computed from second-quantized fermionic
//! Hamiltonians; used as known-answer inputs for eigensolver and
//! phase-estimation validation.

use alsvid_sim::{PauliOperator, PauliString, PauliTerm};

/// H₂ molecule at equilibrium bond distance, reduced to two qubits.
///
/// Parity-mapped STO-3G Hamiltonian with the two symmetry qubits tapered
/// off. Ground-state energy (electronic part): ≈ -1.857275 Hartree.
pub fn h2_two_qubit_reduction() -> PauliOperator {
    let term = |coeff: f64, label: &str| {
        PauliTerm::new(
            coeff,
            PauliString::from_label(label).expect("fixture labels are valid"),
        )
    };
    PauliOperator::from_terms(vec![
        term(-1.052373245772859, "II"),
        term(0.397_937_424_843_180_45, "IZ"),
        term(-0.397_937_424_843_180_45, "ZI"),
        term(-0.011_280_104_256_235_38, "ZZ"),
        term(0.180_931_199_784_231_56, "XX"),
    ])
    .with_num_qubits(2)
}
