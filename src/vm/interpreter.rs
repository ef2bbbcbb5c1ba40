// src/vm/interpreter.rs

//! Applies operation sequences to a register.

use crate::core::{QregError, QregResult, DEFAULT_MAX_REPEAT_DEPTH};
use crate::operations::Operation;
use crate::simulation::Register;
use tracing::{debug, trace};

/// Walks an operation sequence in order and applies each step to a
/// [`Register`].
///
/// `Repeat` bodies are interpreted recursively. Nesting deeper than
/// `max_depth` fails with `NestingTooDeep` before the offending body runs.
/// Any error stops interpretation at once; operations already applied stay
/// applied.
///
/// # Examples
///
/// ```
/// # use qreg::{Interpreter, Operation, Register, QregError};
/// let mut register = Register::with_basis_state(3, 100, 0)?;
/// let ops = vec![Operation::Repeat {
///     count: 2,
///     operations: vec![Operation::Hadamard { qubit: 1 }],
/// }];
/// Interpreter::new().execute(&mut register, &ops)?;
/// // H·H is the identity.
/// assert!((register.amplitudes()[0].re - 1.0).abs() < 1e-12);
/// # Ok::<(), QregError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Interpreter {
    max_depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An interpreter accepting at most `max_depth` nested `Repeat` levels.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Applies `operations` to `register` strictly in order.
    pub fn execute(&self, register: &mut Register, operations: &[Operation]) -> QregResult<()> {
        self.execute_at(register, operations, 0)
    }

    fn execute_at(&self, register: &mut Register, operations: &[Operation], depth: usize) -> QregResult<()> {
        for op in operations {
            self.apply(register, op, depth)?;
        }
        Ok(())
    }

    fn apply(&self, register: &mut Register, op: &Operation, depth: usize) -> QregResult<()> {
        match op {
            Operation::Hadamard { qubit } => register.hadamard_gate(*qubit)?,
            Operation::Phase { qubit, theta } => register.phase_gate(*qubit, *theta)?,
            Operation::PauliX { qubit } => register.pauli_x_gate(*qubit)?,
            Operation::PauliY { qubit } => register.pauli_y_gate(*qubit)?,
            Operation::PauliZ { qubit } => register.pauli_z_gate(*qubit)?,
            Operation::Oracle { target_index } => register.oracle(*target_index)?,
            Operation::J => register.j_gate(),
            Operation::Repeat { count, operations } => {
                if depth >= self.max_depth {
                    return Err(QregError::NestingTooDeep { limit: self.max_depth });
                }
                debug!(count, body = operations.len(), depth, "expanding repeat");
                for _ in 0..*count {
                    self.execute_at(register, operations, depth + 1)?;
                }
                return Ok(());
            }
        }
        trace!(%op, depth, "applied");
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_REPEAT_DEPTH }
    }
}
