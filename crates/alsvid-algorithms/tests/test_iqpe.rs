//! Iterative phase estimation validated against the exact eigensolver.

use std::sync::Arc;

use alsvid_adapter_sim::SimulatorBackend;
use alsvid_algorithms::molecules::h2_two_qubit_reduction;
use alsvid_algorithms::{
    ExactEigensolver, InitialState, IterativePhaseEstimation, QuantumInstance,
    decimal_to_binary_fraction,
};
use alsvid_sim::{ExpansionMode, PauliOperator, PauliTerm};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// End-to-end scenario: five-term 2-qubit H₂ operator, oracle-seeded
/// initial state, 50 time slices, 12 iterations, Suzuki order 2,
/// sampling backend at 100 shots. The estimate must agree with the exact
/// eigenvalue to 2 significant digits.
#[tokio::test]
async fn h2_energy_agrees_with_exact_eigensolver() {
    init_logging();

    let operator = h2_two_qubit_reduction();
    let exact = ExactEigensolver::new(operator.clone(), 1)
        .unwrap()
        .run()
        .unwrap();
    let reference = exact.eigenvalues[0];

    let num_iterations = 12;
    let state = InitialState::custom(exact.eigenvectors[0].to_vec()).unwrap();
    let iqpe = IterativePhaseEstimation::new(operator, state, 50, num_iterations)
        .unwrap()
        .with_expansion(ExpansionMode::Suzuki { order: 2 });

    let backend = Arc::new(SimulatorBackend::with_seed(97));
    let instance = QuantumInstance::new(backend, 100).unwrap();
    let result = iqpe.run(&instance).await.unwrap();

    // 2 significant digits at |E| ≈ 1.86 → half a unit in the second place.
    assert!(
        (result.energy - reference).abs() < 0.05,
        "estimated {} vs reference {}",
        result.energy,
        reference
    );

    // The affine transform maps the reference eigenvalue into the phase
    // register's binary-fraction range.
    let transformed = (reference + result.translation) * result.stretch;
    assert!(
        (0.0..=1.0).contains(&transformed),
        "transformed eigenvalue {transformed} outside [0, 1]"
    );
    let reference_label = decimal_to_binary_fraction(transformed, num_iterations + 3);
    assert_eq!(reference_label.len(), num_iterations + 3);

    // Result bookkeeping is self-consistent.
    assert_eq!(result.top_measurement_label.len(), num_iterations);
    let reconstructed =
        result.top_measurement_decimal / result.stretch - result.translation;
    assert!((reconstructed - result.energy).abs() < 1e-12);
    assert!((result.stretch - 0.5 / result.translation).abs() < 1e-12);
}

/// A diagonal operator whose stretched ground phase is exactly 0.0101₂.
///
/// H = 5·I + 11·Z: ground state |1⟩ at E = -6, translation = 16,
/// stretch = 1/32, phase = (−6 + 16)/32 = 0.3125. Diagonal terms
/// commute, so any product formula is exact and the only estimator
/// error is phase-register resolution.
fn diagonal_fixture() -> (PauliOperator, f64) {
    let operator =
        PauliOperator::from_terms(vec![PauliTerm::identity(5.0), PauliTerm::z(0, 11.0)]);
    (operator, -6.0)
}

fn ground_state_one_qubit() -> InitialState {
    use num_complex::Complex64;
    InitialState::custom(vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)]).unwrap()
}

/// Estimator agreement tightens (non-strictly) as the iteration budget
/// grows, and stays within the phase-register resolution bound.
#[tokio::test]
async fn agreement_tightens_with_iteration_count() {
    init_logging();

    let (operator, reference) = diagonal_fixture();
    let backend = Arc::new(SimulatorBackend::with_seed(23));
    let instance = QuantumInstance::new(backend, 100).unwrap();

    let mut errors = vec![];
    for num_iterations in [2, 3, 4, 6, 8] {
        let iqpe = IterativePhaseEstimation::new(
            operator.clone(),
            ground_state_one_qubit(),
            1,
            num_iterations,
        )
        .unwrap()
        .with_expansion(ExpansionMode::Suzuki { order: 2 });

        let result = iqpe.run(&instance).await.unwrap();
        let error = (result.energy - reference).abs();

        // Resolution bound: 2^-m in phase units, divided by the stretch.
        let bound = 0.5_f64.powi(num_iterations as i32) / result.stretch;
        assert!(
            error <= bound + 1e-9,
            "m={num_iterations}: error {error} exceeds resolution bound {bound}"
        );
        errors.push(error);
    }

    for pair in errors.windows(2) {
        assert!(
            pair[1] <= pair[0] + 1e-9,
            "error increased along the iteration ladder: {errors:?}"
        );
    }
}

/// With enough iterations the exactly representable phase is read out
/// verbatim: label, decimal and energy are all exact.
#[tokio::test]
async fn exactly_representable_phase_is_read_exactly() {
    init_logging();

    let (operator, reference) = diagonal_fixture();
    let iqpe =
        IterativePhaseEstimation::new(operator, ground_state_one_qubit(), 1, 4)
            .unwrap()
            .with_expansion(ExpansionMode::Suzuki { order: 2 });

    let backend = Arc::new(SimulatorBackend::with_seed(5));
    let instance = QuantumInstance::new(backend, 100).unwrap();
    let result = iqpe.run(&instance).await.unwrap();

    assert_eq!(result.top_measurement_label, "0101");
    approx::assert_abs_diff_eq!(result.top_measurement_decimal, 0.3125, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(result.energy, reference, epsilon = 1e-6);
}

/// The default first-order Trotter expansion is also exact for commuting
/// terms, so it reads the same phase.
#[tokio::test]
async fn trotter_expansion_matches_on_diagonal_operator() {
    init_logging();

    let (operator, reference) = diagonal_fixture();
    let iqpe =
        IterativePhaseEstimation::new(operator, ground_state_one_qubit(), 2, 6).unwrap();

    let backend = Arc::new(SimulatorBackend::with_seed(71));
    let instance = QuantumInstance::new(backend, 100).unwrap();
    let result = iqpe.run(&instance).await.unwrap();

    assert_eq!(result.top_measurement_label, "010100");
    assert!((result.energy - reference).abs() < 1e-6);
}
