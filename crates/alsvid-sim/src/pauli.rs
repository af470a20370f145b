//! Pauli operator data structures.
//!
//! A Hermitian operator is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ — realness of the coefficients is exactly
//! Hermiticity of the sum.
//!
//! # Example
//!
//! ```rust
//! use alsvid_sim::pauli::{PauliOp, PauliOperator, PauliString, PauliTerm};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let h = PauliOperator::from_terms(vec![
//!     PauliTerm::new(-1.0, PauliString::from_ops(vec![(0, PauliOp::Z), (1, PauliOp::Z)])),
//!     PauliTerm::new(0.5, PauliString::from_ops(vec![(0, PauliOp::X)])),
//! ]);
//! assert_eq!(h.n_terms(), 2);
//! assert_eq!(h.num_qubits(), 2);
//! ```

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity — contributes a global phase; omitted from strings.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// One-character label.
    pub fn symbol(&self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }

    /// Parse a one-character label.
    pub fn from_symbol(c: char) -> SimResult<Self> {
        match c {
            'I' => Ok(PauliOp::I),
            'X' => Ok(PauliOp::X),
            'Y' => Ok(PauliOp::Y),
            'Z' => Ok(PauliOp::Z),
            other => Err(SimError::InvalidPauliLabel(other)),
        }
    }
}

/// A tensor product of Pauli operators on indexed qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with identity factors
/// omitted. Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    /// Non-identity factors, sorted by qubit index ascending.
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// Parse a label such as `"IZXY"`.
    ///
    /// The rightmost character acts on qubit 0 (little-endian labels,
    /// matching the statevector backend's amplitude indexing).
    pub fn from_label(label: &str) -> SimResult<Self> {
        let mut ops = vec![];
        for (q, c) in label.chars().rev().enumerate() {
            let op = PauliOp::from_symbol(c)?;
            if op != PauliOp::I {
                ops.push((q as u32, op));
            }
        }
        Ok(Self::from_ops(ops))
    }

    /// Render a label of the given width, rightmost character = qubit 0.
    pub fn label(&self, width: u32) -> String {
        let mut chars = vec!['I'; width as usize];
        for &(q, op) in &self.ops {
            if q < width {
                chars[(width - 1 - q) as usize] = op.symbol();
            }
        }
        chars.into_iter().collect()
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity operators (pure global phase).
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl PauliTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: identity (scalar) term.
    pub fn identity(coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([]))
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }

    /// Shorthand: XX coupling term.
    pub fn xx(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::X), (q1, PauliOp::X)]),
        )
    }
}

/// A sum-of-Pauli-strings Hermitian operator.
///
/// H = Σ_k  c_k · P_k
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliOperator {
    terms: Vec<PauliTerm>,
    n_qubits: u32,
}

impl PauliOperator {
    /// Create from a list of terms, inferring the register width.
    pub fn from_terms(terms: Vec<PauliTerm>) -> Self {
        let n_qubits = terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1);
        Self { terms, n_qubits }
    }

    /// Override the register width (to pad implicit identity qubits).
    ///
    /// The width can only grow; a width below the operator's support is
    /// ignored.
    #[must_use]
    pub fn with_num_qubits(mut self, n: u32) -> Self {
        self.n_qubits = self.n_qubits.max(n);
        self
    }

    /// Deserialize from the Pauli-dict wire form:
    ///
    /// ```json
    /// {"paulis": [{"coeff": {"real": -1.05, "imag": 0.0}, "label": "II"}, …]}
    /// ```
    ///
    /// Labels fix the register width; a nonzero imaginary part is rejected
    /// as non-Hermitian.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let dict: PauliDict = serde_json::from_str(json)?;
        let mut terms = vec![];
        let mut width: Option<usize> = None;
        for entry in &dict.paulis {
            let w = entry.label.chars().count();
            match width {
                None => width = Some(w),
                Some(expected) if expected != w => {
                    return Err(SimError::LabelWidthMismatch { expected, got: w });
                }
                _ => {}
            }
            if entry.coeff.imag != 0.0 {
                return Err(SimError::NonHermitian {
                    label: entry.label.clone(),
                    imag: entry.coeff.imag,
                });
            }
            terms.push(PauliTerm::new(
                entry.coeff.real,
                PauliString::from_label(&entry.label)?,
            ));
        }
        Ok(Self::from_terms(terms).with_num_qubits(width.unwrap_or(0) as u32))
    }

    /// All terms.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Register width.
    pub fn num_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Spectral norm upper bound: Σ |c_k|.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// Sum of the identity-term coefficients.
    pub fn identity_coeff(&self) -> f64 {
        self.terms
            .iter()
            .filter(|t| t.pauli.is_identity())
            .map(|t| t.coeff)
            .sum()
    }

    /// The affinely transformed operator `(H + translation·I) · stretch`.
    ///
    /// Identity terms are merged into a single leading term; phase
    /// estimation uses this to map the spectrum into [0, 1].
    pub fn scaled_shifted(&self, stretch: f64, translation: f64) -> PauliOperator {
        let identity = (self.identity_coeff() + translation) * stretch;
        let mut terms = vec![];
        if identity != 0.0 {
            terms.push(PauliTerm::identity(identity));
        }
        terms.extend(
            self.terms
                .iter()
                .filter(|t| !t.pauli.is_identity())
                .map(|t| PauliTerm::new(t.coeff * stretch, t.pauli.clone())),
        );
        PauliOperator {
            terms,
            n_qubits: self.n_qubits,
        }
    }

    /// Materialize the dense 2^n × 2^n matrix.
    ///
    /// Amplitude index bit q corresponds to qubit q (little-endian), the
    /// same convention the statevector backend uses.
    pub fn to_matrix(&self) -> Array2<Complex64> {
        let dim = 1usize << self.n_qubits;
        let mut m = Array2::<Complex64>::zeros((dim, dim));
        for term in &self.terms {
            let mut xmask = 0usize;
            for &(q, op) in term.pauli.ops() {
                if matches!(op, PauliOp::X | PauliOp::Y) {
                    xmask |= 1 << q;
                }
            }
            for col in 0..dim {
                let row = col ^ xmask;
                let mut amp = Complex64::new(term.coeff, 0.0);
                for &(q, op) in term.pauli.ops() {
                    let bit = (col >> q) & 1;
                    match op {
                        PauliOp::Z => {
                            if bit == 1 {
                                amp = -amp;
                            }
                        }
                        PauliOp::Y => {
                            // Y|0⟩ = i|1⟩, Y|1⟩ = -i|0⟩
                            amp *= Complex64::new(0.0, 1.0);
                            if bit == 1 {
                                amp = -amp;
                            }
                        }
                        PauliOp::X | PauliOp::I => {}
                    }
                }
                m[[row, col]] += amp;
            }
        }
        m
    }
}

impl FromIterator<PauliTerm> for PauliOperator {
    fn from_iter<T: IntoIterator<Item = PauliTerm>>(iter: T) -> Self {
        Self::from_terms(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PauliDict {
    paulis: Vec<PauliDictTerm>,
}

#[derive(Debug, Deserialize)]
struct PauliDictTerm {
    coeff: PauliDictCoeff,
    label: String,
}

#[derive(Debug, Deserialize)]
struct PauliDictCoeff {
    real: f64,
    #[serde(default)]
    imag: f64,
}
