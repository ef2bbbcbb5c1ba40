//! Numeric constants and register defaults.

/// Defaults applied when a program leaves optional fields out.
pub mod qreg_constants {
    /// Qubit count used when a program omits `num_qbits`.
    pub const DEFAULT_QUBITS: usize = 3;
    /// Sample count used when a program omits `num_measures`.
    pub const DEFAULT_MEASUREMENTS: usize = 100;
    /// Largest register the executor will build. The operator builder
    /// materialises a 2^n x 2^n matrix, so this stays small.
    pub const DEFAULT_MAX_QUBITS: usize = 10;
    /// Largest register a full gate operator is built for: 4^14 entries of
    /// 16 bytes is 4 GiB.
    pub const MAX_OPERATOR_QUBITS: usize = 14;
    /// Deepest `Repeat` nesting the interpreter accepts.
    pub const DEFAULT_MAX_REPEAT_DEPTH: usize = 64;
    /// 1/√2, the Hadamard normalisation factor.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
}
