// src/lib.rs

//! `qreg` - A small dense state-vector quantum register simulator
//!
//! A [`Register`] holds `2^n` complex amplitudes. Single-qubit gates are
//! applied by building the full operator as a Kronecker product of 2x2
//! matrices, diagonal "global" operators flip the sign of chosen amplitudes,
//! and measurement statistics are estimated by repeated sampling.
//!
//! Programs (qubit count, sample count, initial vector, operations) are run
//! through the [`Executor`], which is also reachable from JSON via
//! [`Executor::run_json`].
//!
//! Costs grow as O(4^n) per gate, so registers stay at a handful of qubits.

pub mod core;
pub mod gates;
pub mod operations;
pub mod simulation;
pub mod vm;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{basis_label, IndexKind, QregError, QregResult};
pub use gates::Gate;
pub use operations::Operation;
pub use simulation::{MeasurementDistribution, Register};
pub use vm::{ExecutionResult, Executor, ExecutorConfig, Interpreter, Program, ProgramBuilder};
pub use validation::{approx_equal_vectors, is_normalized, total_probability};

// Example 1: Phase flip between two Hadamards
// H·P(π)·H on qubit 3 turns |000> into |001> deterministically.
/// ```
/// use qreg::{Executor, Operation, ProgramBuilder, QregError};
/// use num_complex::Complex64;
/// use rand::SeedableRng;
/// use std::f64::consts::PI;
///
/// let mut initial = vec![Complex64::new(0.0, 0.0); 8];
/// initial[0] = Complex64::new(1.0, 0.0);
///
/// let program = ProgramBuilder::new()
///     .qubits(3)
///     .measurements(1000)
///     .initial_vector(initial)
///     .add(Operation::Hadamard { qubit: 3 })
///     .add(Operation::Phase { qubit: 3, theta: PI })
///     .add(Operation::Hadamard { qubit: 3 })
///     .build()?;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let result = Executor::new().run_with_rng(&program, &mut rng)?;
///
/// println!("{}", result.states);
/// assert_eq!(result.states.get("|001>"), Some(1.0));
/// assert!((result.final_vector[1] - Complex64::new(1.0, 0.0)).norm() < 1e-9);
/// # Ok::<(), QregError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Running a JSON program
// The same wire document an HTTP front end would forward.
/// ```
/// use qreg::{Executor, QregError};
///
/// let body = r#"{
///     "num_qbits": 2,
///     "num_measures": 100,
///     "initial_vector": [1.0, 0, 0, 0],
///     "operations": [
///         {"op": "Repeat", "count": 2, "operations": [{"op": "X", "qbit": 1}]},
///         {"op": "X", "qbit": 2}
///     ]
/// }"#;
///
/// let out = Executor::new().run_json(body)?;
/// assert!(out.contains(r#""states":{"|01>":1.0}"#));
///
/// // Unknown operations are rejected rather than skipped.
/// let bad = r#"{"initial_vector": [1, 0, 0, 0, 0, 0, 0, 0], "operations": [{"op": "Q"}]}"#;
/// assert!(matches!(Executor::new().run_json(bad), Err(QregError::UnknownOperation { .. })));
/// # Ok::<(), QregError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
