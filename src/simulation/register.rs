// src/simulation/register.rs

//! The register: an owned amplitude vector plus the gate and sign-flip
//! operations that evolve it.

use crate::core::{QregError, QregResult, RoundedAmplitude, DEFAULT_MEASUREMENTS, DEFAULT_QUBITS};
use crate::gates::{self, Gate};
use crate::simulation::operator::build_operator;
use crate::simulation::sampling::{self, MeasurementDistribution};
use num_complex::Complex64;
use num_traits::Zero;
use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;

// Largest qubit count whose amplitude vector stays within `isize::MAX`
// bytes, the most any allocation may request.
const MAX_ADDRESSABLE_QUBITS: usize = (isize::MAX as usize / std::mem::size_of::<Complex64>()).ilog2() as usize;

/// A register of `qubit_count` qubits holding `2^qubit_count` complex
/// amplitudes.
///
/// Index `i` of the amplitude vector is the basis state whose binary form
/// (qubit 1 as the most significant bit) equals `i`. The vector is not
/// renormalised anywhere: whoever sets it is trusted to keep
/// Σ|aᵢ|² ≈ 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    qubit_count: usize,
    state_count: usize,
    measurement_count: usize,
    amplitudes: Vec<Complex64>,
}

impl Register {
    /// Creates a register with every amplitude zero. Set the initial state
    /// through [`Register::set_amplitudes`] or [`Register::amplitudes_mut`].
    ///
    /// # Errors
    /// * `InvalidProgramShape` for zero qubits.
    /// * `QubitLimitExceeded` when `2^qubit_count` amplitudes cannot be
    ///   addressed (58 qubits on 64-bit targets), or when the allocator
    ///   refuses the vector. In the latter case `limit` is
    ///   `qubit_count - 1`.
    pub fn new(qubit_count: usize, measurement_count: usize) -> QregResult<Self> {
        if qubit_count == 0 {
            return Err(QregError::invalid_shape("a register needs at least one qubit"));
        }
        if qubit_count > MAX_ADDRESSABLE_QUBITS {
            return Err(QregError::QubitLimitExceeded { requested: qubit_count, limit: MAX_ADDRESSABLE_QUBITS });
        }
        let state_count = 1usize << qubit_count;

        let mut amplitudes = Vec::new();
        amplitudes
            .try_reserve_exact(state_count)
            .map_err(|_| QregError::QubitLimitExceeded { requested: qubit_count, limit: qubit_count - 1 })?;
        amplitudes.resize(state_count, Complex64::zero());
        Ok(Self {
            qubit_count,
            state_count,
            measurement_count,
            amplitudes,
        })
    }

    /// Creates a register in the basis state `index` (amplitude 1 there,
    /// 0 elsewhere).
    pub fn with_basis_state(qubit_count: usize, measurement_count: usize, index: usize) -> QregResult<Self> {
        let mut register = Self::new(qubit_count, measurement_count)?;
        if index >= register.state_count {
            return Err(QregError::state_out_of_range(index, register.state_count));
        }
        register.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(register)
    }

    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// `2^qubit_count`.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Number of samples [`Register::estimate_distribution`] draws.
    pub fn measurement_count(&self) -> usize {
        self.measurement_count
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable view of the amplitudes. The length is fixed, so the
    /// `state_count` invariant cannot be broken through it.
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Replaces the amplitude vector verbatim.
    ///
    /// # Errors
    /// `LengthMismatch` unless `amplitudes.len() == state_count`.
    pub fn set_amplitudes(&mut self, amplitudes: Vec<Complex64>) -> QregResult<()> {
        if amplitudes.len() != self.state_count {
            return Err(QregError::LengthMismatch { expected: self.state_count, found: amplitudes.len() });
        }
        self.amplitudes = amplitudes;
        Ok(())
    }

    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Applies `gate` to `target_qubit` (1-based) by building the full
    /// operator and replacing the vector with `operator · amplitudes`.
    pub fn apply_unitary(&mut self, gate: &Gate, target_qubit: usize) -> QregResult<()> {
        let operator = build_operator(self.qubit_count, target_qubit, gate)?;
        self.amplitudes = operator.apply(&self.amplitudes)?;
        Ok(())
    }

    /// Negates the amplitude at every index in `indices`, leaving the others
    /// alone. Repeated indices count once.
    ///
    /// # Errors
    /// `IndexOutOfRange` if any index is `>= state_count`. The vector is
    /// untouched in that case.
    pub fn apply_diagonal_global<I>(&mut self, indices: I) -> QregResult<()>
    where
        I: IntoIterator<Item = usize>,
    {
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.state_count) {
            return Err(QregError::state_out_of_range(bad, self.state_count));
        }
        for i in indices {
            self.amplitudes[i] = -self.amplitudes[i];
        }
        Ok(())
    }

    pub fn hadamard_gate(&mut self, qubit: usize) -> QregResult<()> {
        self.apply_unitary(&gates::HADAMARD, qubit)
    }

    /// Phase rotation of `theta` radians on `qubit`.
    pub fn phase_gate(&mut self, qubit: usize, theta: f64) -> QregResult<()> {
        self.apply_unitary(&Gate::phase(theta), qubit)
    }

    pub fn pauli_x_gate(&mut self, qubit: usize) -> QregResult<()> {
        self.apply_unitary(&gates::PAULI_X, qubit)
    }

    pub fn pauli_y_gate(&mut self, qubit: usize) -> QregResult<()> {
        self.apply_unitary(&gates::PAULI_Y, qubit)
    }

    pub fn pauli_z_gate(&mut self, qubit: usize) -> QregResult<()> {
        self.apply_unitary(&gates::PAULI_Z, qubit)
    }

    /// The `J` operator: flips the sign of the |0…0> amplitude.
    pub fn j_gate(&mut self) {
        self.amplitudes[0] = -self.amplitudes[0];
    }

    /// Flips the sign of the amplitude at `target_index`.
    pub fn oracle(&mut self, target_index: usize) -> QregResult<()> {
        self.apply_diagonal_global([target_index])
    }

    /// Draws one measurement outcome label. See [`sampling::measure_once`].
    pub fn measure<R: Rng>(&self, rng: &mut R) -> String {
        sampling::measure_once(self, rng)
    }

    /// Relative frequencies over `measurement_count` draws. See
    /// [`sampling::estimate_distribution`].
    pub fn estimate_distribution<R: Rng>(&self, rng: &mut R) -> MeasurementDistribution {
        sampling::estimate_distribution(self, rng)
    }
}

impl Default for Register {
    /// Three qubits, 100 measurements, all amplitudes zero.
    fn default() -> Self {
        let state_count = 1 << DEFAULT_QUBITS;
        Self {
            qubit_count: DEFAULT_QUBITS,
            state_count,
            measurement_count: DEFAULT_MEASUREMENTS,
            amplitudes: vec![Complex64::zero(); state_count],
        }
    }
}

impl fmt::Display for Register {
    /// `[1.0, 0.0, 0.71-0.71j, …]`: two decimals, imaginary part only when
    /// it matters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, amplitude) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { ", " } else { "" }, RoundedAmplitude(*amplitude))?;
        }
        write!(f, "]")
    }
}
