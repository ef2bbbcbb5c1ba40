// src/simulation/operator.rs

//! Dense register-wide operators built as Kronecker products of per-qubit
//! gates.

use crate::core::{QregError, QregResult, MAX_OPERATOR_QUBITS};
use crate::gates::{Gate, IDENTITY};
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

/// A square complex matrix acting on the whole amplitude vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    matrix: DMatrix<Complex64>,
}

impl Operator {
    /// Lifts a 2x2 gate into a 2-dimensional operator.
    pub fn from_gate(gate: &Gate) -> Self {
        let m = gate.matrix();
        Self { matrix: DMatrix::from_row_slice(2, 2, &[m[0][0], m[0][1], m[1][0], m[1][1]]) }
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Kronecker product `self ⊗ other`. The left operand becomes the more
    /// significant axis of the result.
    pub fn kron(&self, other: &Operator) -> Operator {
        Operator { matrix: self.matrix.kronecker(&other.matrix) }
    }

    /// Matrix-vector product `self · vector`.
    ///
    /// # Errors
    /// `LengthMismatch` if `vector` does not have `dim` entries.
    pub fn apply(&self, vector: &[Complex64]) -> QregResult<Vec<Complex64>> {
        if vector.len() != self.dim() {
            return Err(QregError::LengthMismatch { expected: self.dim(), found: vector.len() });
        }
        let product = &self.matrix * DVector::from_column_slice(vector);
        Ok(product.iter().copied().collect())
    }
}

/// Builds the full `2^n x 2^n` operator applying `gate` to `target_qubit`
/// (1-based) and the identity to every other qubit.
///
/// The per-qubit matrices are reduced left to right, so qubit 1 ends up as
/// the most significant axis, matching the amplitude index convention.
///
/// Cost is O(4^n) in time and memory.
///
/// # Errors
/// * `IndexOutOfRange` if `target_qubit` is not in `1..=qubit_count`.
/// * `QubitLimitExceeded` above [`MAX_OPERATOR_QUBITS`].
pub fn build_operator(qubit_count: usize, target_qubit: usize, gate: &Gate) -> QregResult<Operator> {
    if target_qubit == 0 || target_qubit > qubit_count {
        return Err(QregError::qubit_out_of_range(target_qubit, qubit_count));
    }
    if qubit_count > MAX_OPERATOR_QUBITS {
        return Err(QregError::QubitLimitExceeded { requested: qubit_count, limit: MAX_OPERATOR_QUBITS });
    }
    let identity = Operator::from_gate(&IDENTITY);
    let target = Operator::from_gate(gate);

    let factor = |qubit: usize| if qubit == target_qubit { &target } else { &identity };
    let mut result = factor(1).clone();
    for qubit in 2..=qubit_count {
        result = result.kron(factor(qubit));
    }
    Ok(result)
}
