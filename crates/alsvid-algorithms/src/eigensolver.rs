//! Exact diagonalization of Pauli operators.
//!
//! Serves as the classical reference oracle in validation tests: given a
//! Hermitian operator it returns the k algebraically smallest eigenpairs
//! by dense diagonalization. The result is a pure function of the
//! operator — deterministic and idempotent.
//!
//! Diagonalization uses cyclic Jacobi rotations in their complex
//! Hermitian form. At the register widths this workspace targets
//! (dimension ≤ a few hundred) Jacobi is simple, numerically robust,
//! and produces orthonormal eigenvectors directly.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use tracing::debug;

use alsvid_sim::PauliOperator;

use crate::error::{AlgorithmError, AlgorithmResult};

const MAX_SWEEPS: usize = 64;

/// Exact eigensolver over a [`PauliOperator`].
pub struct ExactEigensolver {
    operator: PauliOperator,
    k: usize,
}

/// Eigenpairs returned by the solver, eigenvalues ascending.
///
/// Eigenvalues of a Hermitian operator are real, so they are reported as
/// `f64` rather than complex scalars.
#[derive(Debug, Clone)]
pub struct EigensolverResult {
    /// The k smallest eigenvalues, ascending.
    pub eigenvalues: Vec<f64>,
    /// Normalized eigenvectors, matching `eigenvalues` by index.
    pub eigenvectors: Vec<Array1<Complex64>>,
}

impl ExactEigensolver {
    /// Create a solver returning the `k` algebraically smallest eigenpairs.
    pub fn new(operator: PauliOperator, k: usize) -> AlgorithmResult<Self> {
        if operator.n_terms() == 0 {
            return Err(AlgorithmError::EmptyOperator);
        }
        let dim = 1usize << operator.num_qubits();
        if k == 0 || k > dim {
            return Err(AlgorithmError::InvalidEigenCount { k, dim });
        }
        Ok(Self { operator, k })
    }

    /// Diagonalize and return the k smallest eigenpairs.
    pub fn run(&self) -> AlgorithmResult<EigensolverResult> {
        let matrix = self.operator.to_matrix();
        debug!(
            dim = matrix.nrows(),
            k = self.k,
            n_terms = self.operator.n_terms(),
            "diagonalising operator"
        );
        let (eigenvalues, vectors) = jacobi_hermitian(matrix)?;

        let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
        order.sort_by(|&a, &b| eigenvalues[a].total_cmp(&eigenvalues[b]));

        let eigenvalues: Vec<f64> = order.iter().take(self.k).map(|&i| eigenvalues[i]).collect();
        let eigenvectors: Vec<Array1<Complex64>> = order
            .iter()
            .take(self.k)
            .map(|&i| vectors.column(i).to_owned())
            .collect();

        Ok(EigensolverResult {
            eigenvalues,
            eigenvectors,
        })
    }
}

/// Diagonalize a Hermitian matrix with cyclic Jacobi rotations.
///
/// Returns the (unsorted) real diagonal and the accumulated unitary whose
/// columns are the eigenvectors.
fn jacobi_hermitian(
    mut a: Array2<Complex64>,
) -> AlgorithmResult<(Vec<f64>, Array2<Complex64>)> {
    let n = a.nrows();
    let mut v = Array2::<Complex64>::eye(n);
    if n == 1 {
        return Ok((vec![a[[0, 0]].re], v));
    }

    let tol = 1e-12 * frobenius_norm(&a).max(1.0);

    for _ in 0..MAX_SWEEPS {
        if off_diagonal_norm(&a) <= tol {
            let diag: Vec<f64> = (0..n).map(|i| a[[i, i]].re).collect();
            return Ok((diag, v));
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                let r = apq.norm();
                if r <= tol / n as f64 {
                    continue;
                }

                // Unitary 2×2 rotation zeroing a_pq:
                //   U = [[c, -s·e^{iφ}], [s·e^{-iφ}, c]],  φ = arg(a_pq),
                //   tan(2θ) = 2|a_pq| / (a_pp - a_qq).
                let phi = apq.arg();
                let theta = 0.5 * (2.0 * r).atan2(a[[p, p]].re - a[[q, q]].re);
                let c = theta.cos();
                let s = theta.sin();
                let e_pos = Complex64::from_polar(1.0, phi);
                let e_neg = Complex64::from_polar(1.0, -phi);

                // A ← A·U
                for i in 0..n {
                    let ap = a[[i, p]];
                    let aq = a[[i, q]];
                    a[[i, p]] = c * ap + s * e_neg * aq;
                    a[[i, q]] = -s * e_pos * ap + c * aq;
                }
                // A ← U†·A
                for j in 0..n {
                    let ap = a[[p, j]];
                    let aq = a[[q, j]];
                    a[[p, j]] = c * ap + s * e_pos * aq;
                    a[[q, j]] = -s * e_neg * ap + c * aq;
                }
                // V ← V·U
                for i in 0..n {
                    let vp = v[[i, p]];
                    let vq = v[[i, q]];
                    v[[i, p]] = c * vp + s * e_neg * vq;
                    v[[i, q]] = -s * e_pos * vp + c * vq;
                }
            }
        }
    }

    Err(AlgorithmError::NoConvergence(MAX_SWEEPS))
}

fn frobenius_norm(a: &Array2<Complex64>) -> f64 {
    a.iter().map(|x| x.norm_sqr()).sum::<f64>().sqrt()
}

fn off_diagonal_norm(a: &Array2<Complex64>) -> f64 {
    let n = a.nrows();
    let mut sum = 0.0;
    for p in 0..n {
        for q in 0..n {
            if p != q {
                sum += a[[p, q]].norm_sqr();
            }
        }
    }
    sum.sqrt()
}
