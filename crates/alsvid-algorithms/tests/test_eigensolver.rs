//! Oracle invariants: exact diagonalization against dense linear algebra.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use proptest::prelude::*;

use alsvid_algorithms::ExactEigensolver;
use alsvid_algorithms::molecules::h2_two_qubit_reduction;
use alsvid_sim::{PauliOperator, PauliString, PauliTerm};

// ---------------------------------------------------------------------------
// Dense helpers (test-local)
// ---------------------------------------------------------------------------

fn matvec(m: &Array2<Complex64>, v: &Array1<Complex64>) -> Array1<Complex64> {
    m.dot(v)
}

/// Matrix exponential by scaling-and-squaring with a Taylor series.
///
/// Good to ~1e-12 for the small, well-scaled matrices used here.
fn expm(m: &Array2<Complex64>) -> Array2<Complex64> {
    let n = m.nrows();
    let norm_bound: f64 = m.iter().map(|x| x.norm()).sum();
    let scalings = norm_bound.max(1.0).log2().ceil() as i32 + 1;
    let scaled = m.mapv(|x| x / 2.0_f64.powi(scalings));

    let mut result = Array2::<Complex64>::eye(n);
    let mut term = Array2::<Complex64>::eye(n);
    for j in 1..=24 {
        term = term.dot(&scaled).mapv(|x| x / j as f64);
        result = result + &term;
    }
    for _ in 0..scalings {
        result = result.dot(&result);
    }
    result
}

fn infinity_norm(v: &Array1<Complex64>) -> f64 {
    v.iter().map(|x| x.norm()).fold(0.0, f64::max)
}

// ---------------------------------------------------------------------------
// Known-answer tests
// ---------------------------------------------------------------------------

#[test]
fn h2_ground_state_energy_matches_reference() {
    let operator = h2_two_qubit_reduction();
    let result = ExactEigensolver::new(operator, 1).unwrap().run().unwrap();
    approx::assert_abs_diff_eq!(result.eigenvalues[0], -1.857275, epsilon = 1e-5);
}

#[test]
fn h2_eigenpair_satisfies_eigen_equation() {
    let operator = h2_two_qubit_reduction();
    let matrix = operator.to_matrix();
    let result = ExactEigensolver::new(operator, 1).unwrap().run().unwrap();

    let lambda = result.eigenvalues[0];
    let v = &result.eigenvectors[0];

    let hv = matvec(&matrix, v);
    let lv = v.mapv(|x| x * lambda);
    let residual = infinity_norm(&(&hv - &lv));
    assert!(residual < 1e-7, "‖Hv - λv‖∞ = {residual}");
}

#[test]
fn h2_eigenpair_satisfies_unitary_evolution_identity() {
    // exp(-iH)·v = exp(-iλ)·v for the ground eigenpair.
    let operator = h2_two_qubit_reduction();
    let matrix = operator.to_matrix();
    let result = ExactEigensolver::new(operator, 1).unwrap().run().unwrap();

    let lambda = result.eigenvalues[0];
    let v = &result.eigenvectors[0];

    let u = expm(&matrix.mapv(|x| x * Complex64::new(0.0, -1.0)));
    let uv = matvec(&u, v);
    let phase_v = v.mapv(|x| x * Complex64::from_polar(1.0, -lambda));
    let residual = infinity_norm(&(&uv - &phase_v));
    assert!(residual < 1e-7, "‖exp(-iH)v - exp(-iλ)v‖∞ = {residual}");
}

#[test]
fn rerunning_the_oracle_is_idempotent() {
    let operator = h2_two_qubit_reduction();
    let solver = ExactEigensolver::new(operator, 4).unwrap();
    let first = solver.run().unwrap();
    let second = solver.run().unwrap();
    assert_eq!(first.eigenvalues, second.eigenvalues);
    for (a, b) in first.eigenvectors.iter().zip(&second.eigenvectors) {
        assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Property tests over random 2-qubit Hermitian operators
// ---------------------------------------------------------------------------

const LABELS: [&str; 15] = [
    "IX", "IY", "IZ", "XI", "XX", "XY", "XZ", "YI", "YX", "YY", "YZ", "ZI", "ZX", "ZY", "ZZ",
];

fn arb_operator() -> impl Strategy<Value = PauliOperator> {
    prop::collection::vec((0usize..LABELS.len(), -2.0..2.0_f64), 1..6).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(idx, coeff)| {
                PauliTerm::new(coeff, PauliString::from_label(LABELS[idx]).unwrap())
            })
            .collect::<PauliOperator>()
            .with_num_qubits(2)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn eigenpairs_satisfy_eigen_equation(operator in arb_operator()) {
        prop_assume!(operator.lambda() > 1e-6);
        let matrix = operator.to_matrix();
        let result = ExactEigensolver::new(operator, 4).unwrap().run().unwrap();

        for (lambda, v) in result.eigenvalues.iter().zip(&result.eigenvectors) {
            let hv = matvec(&matrix, v);
            let lv = v.mapv(|x| x * *lambda);
            prop_assert!(infinity_norm(&(&hv - &lv)) < 1e-7);
            // Eigenvectors come out normalized.
            let norm: f64 = v.iter().map(|x| x.norm_sqr()).sum::<f64>().sqrt();
            prop_assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn eigenvalues_are_sorted_and_bounded(operator in arb_operator()) {
        prop_assume!(operator.lambda() > 1e-6);
        let bound = operator.lambda();
        let result = ExactEigensolver::new(operator, 4).unwrap().run().unwrap();

        for pair in result.eigenvalues.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
        prop_assert!(result.eigenvalues[0] >= -bound - 1e-9);
        prop_assert!(result.eigenvalues[3] <= bound + 1e-9);
    }

    #[test]
    fn diagonalization_is_deterministic(operator in arb_operator()) {
        prop_assume!(operator.lambda() > 1e-6);
        let solver = ExactEigensolver::new(operator, 2).unwrap();
        let a = solver.run().unwrap();
        let b = solver.run().unwrap();
        prop_assert_eq!(a.eigenvalues, b.eigenvalues);
    }
}
