// src/gates/mod.rs

//! The single-qubit gate catalog.
//!
//! Every gate is a 2x2 unitary matrix stored row-major. Index 0 of either
//! axis is the qubit's |0> component, index 1 its |1> component.

use crate::core::FRAC_1_SQRT_2;
use num_complex::Complex64;
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const H: Complex64 = Complex64::new(FRAC_1_SQRT_2, 0.0);

/// A 2x2 complex matrix acting on one qubit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    matrix: [[Complex64; 2]; 2],
}

/// Leaves the qubit unchanged.
pub const IDENTITY: Gate = Gate::new([[ONE, ZERO], [ZERO, ONE]]);

/// (1/√2)·[[1, 1], [1, -1]]
pub const HADAMARD: Gate = Gate::new([[H, H], [H, Complex64::new(-FRAC_1_SQRT_2, 0.0)]]);

/// Bit flip, [[0, 1], [1, 0]].
pub const PAULI_X: Gate = Gate::new([[ZERO, ONE], [ONE, ZERO]]);

/// [[0, -i], [i, 0]]
pub const PAULI_Y: Gate = Gate::new([[ZERO, Complex64::new(0.0, -1.0)], [I, ZERO]]);

/// Phase flip, [[1, 0], [0, -1]].
pub const PAULI_Z: Gate = Gate::new([[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]]);

impl Gate {
    /// Wraps a row-major 2x2 matrix. Unitarity is not checked; see
    /// [`Gate::is_unitary`].
    pub const fn new(matrix: [[Complex64; 2]; 2]) -> Self {
        Self { matrix }
    }

    /// Phase rotation by `theta` radians: [[1, 0], [0, e^(iθ)]].
    pub fn phase(theta: f64) -> Self {
        Self::new([[ONE, ZERO], [ZERO, Complex64::new(theta.cos(), theta.sin())]])
    }

    /// The underlying row-major matrix.
    pub fn matrix(&self) -> &[[Complex64; 2]; 2] {
        &self.matrix
    }

    /// True when G†G equals the identity within `tolerance` per entry.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        (0..2).all(|row| {
            (0..2).all(|col| {
                let product: Complex64 = (0..2)
                    .map(|k| self.matrix[k][row].conj() * self.matrix[k][col])
                    .sum();
                let expected = if row == col { ONE } else { ZERO };
                (product - expected).norm() <= tolerance
            })
        })
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.matrix;
        write!(f, "[[{:.4}, {:.4}], [{:.4}, {:.4}]]", m[0][0], m[0][1], m[1][0], m[1][1])
    }
}
