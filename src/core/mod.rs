// src/core/mod.rs

//! Core types shared by every other module

pub mod error;
pub mod state;
pub mod constants;

pub use error::{IndexKind, QregError, QregResult};
pub use state::{basis_label, RoundedAmplitude};
pub use constants::qreg_constants::{
    DEFAULT_MAX_QUBITS, DEFAULT_MAX_REPEAT_DEPTH, DEFAULT_MEASUREMENTS, DEFAULT_QUBITS,
    FRAC_1_SQRT_2, MAX_OPERATOR_QUBITS,
};
