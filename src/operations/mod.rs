// src/operations/mod.rs

//! Operations a program applies to a register.
//!
//! The set is closed: decoding a program maps each wire tag onto one of
//! these variants or fails with `UnknownOperation`, so the interpreter's
//! dispatch is an exhaustive `match`.

use std::fmt;

/// One step of a register program.
///
/// Qubit indices are 1-based (qubit 1 is the most significant bit of a
/// basis-state index). Basis-state indices are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Hadamard gate on `qubit`. Wire tag `H`.
    Hadamard {
        qubit: usize,
    },
    /// Phase rotation e^(iθ) of the |1> component of `qubit`. Wire tag `P`.
    Phase {
        qubit: usize,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Pauli-X (bit flip). Wire tag `X`.
    PauliX {
        qubit: usize,
    },
    /// Pauli-Y. Wire tag `Y`.
    PauliY {
        qubit: usize,
    },
    /// Pauli-Z (phase flip). Wire tag `Z`.
    PauliZ {
        qubit: usize,
    },
    /// Negates the amplitude of basis state `target_index`. Wire tag `O`.
    Oracle {
        target_index: usize,
    },
    /// Negates the amplitude of |0…0>. Wire tag `J`.
    J,
    /// Runs `operations` in order, `count` times over. Each pass sees the
    /// state left by the previous one. Wire tag `Repeat`.
    Repeat {
        count: usize,
        operations: Vec<Operation>,
    },
}

impl Operation {
    /// The wire tag naming this operation.
    pub fn tag(&self) -> &'static str {
        match self {
            Operation::Hadamard { .. } => "H",
            Operation::Phase { .. } => "P",
            Operation::PauliX { .. } => "X",
            Operation::PauliY { .. } => "Y",
            Operation::PauliZ { .. } => "Z",
            Operation::Oracle { .. } => "O",
            Operation::J => "J",
            Operation::Repeat { .. } => "Repeat",
        }
    }

    /// How many gate or operator applications this operation performs once
    /// every `Repeat` is unrolled. Saturates instead of overflowing.
    pub fn count_applications(&self) -> usize {
        match self {
            Operation::Repeat { count, operations } => {
                let body = operations
                    .iter()
                    .fold(0usize, |acc, op| acc.saturating_add(op.count_applications()));
                body.saturating_mul(*count)
            }
            _ => 1,
        }
    }

    /// Nesting depth: 0 for a plain operation, 1 + the deepest child for a
    /// `Repeat`.
    pub fn depth(&self) -> usize {
        match self {
            Operation::Repeat { operations, .. } => {
                1 + operations.iter().map(Operation::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Hadamard { qubit }
            | Operation::PauliX { qubit }
            | Operation::PauliY { qubit }
            | Operation::PauliZ { qubit } => write!(f, "{}({})", self.tag(), qubit),
            Operation::Phase { qubit, theta } => write!(f, "P({}, {:.4})", qubit, theta),
            Operation::Oracle { target_index } => write!(f, "O({})", target_index),
            Operation::J => write!(f, "J"),
            Operation::Repeat { count, operations } => {
                write!(f, "Repeat({})[", count)?;
                for (i, op) in operations.iter().enumerate() {
                    write!(f, "{}{}", if i > 0 { ", " } else { "" }, op)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Operation {
        Operation::Repeat {
            count: 3,
            operations: vec![
                Operation::Hadamard { qubit: 1 },
                Operation::Repeat { count: 2, operations: vec![Operation::J, Operation::PauliZ { qubit: 2 }] },
            ],
        }
    }

    #[test]
    fn test_count_applications_unrolls_repeats() {
        assert_eq!(Operation::J.count_applications(), 1);
        assert_eq!(nested().count_applications(), 3 * (1 + 2 * 2));
        assert_eq!(Operation::Repeat { count: 0, operations: vec![Operation::J] }.count_applications(), 0);
    }

    #[test]
    fn test_depth() {
        assert_eq!(Operation::J.depth(), 0);
        assert_eq!(Operation::Repeat { count: 1, operations: vec![] }.depth(), 1);
        assert_eq!(nested().depth(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(nested().to_string(), "Repeat(3)[H(1), Repeat(2)[J, Z(2)]]");
        assert_eq!(Operation::Phase { qubit: 3, theta: 0.5 }.to_string(), "P(3, 0.5000)");
    }

    #[test]
    fn test_tags_match_variants() {
        let ops = [
            Operation::Hadamard { qubit: 1 },
            Operation::Phase { qubit: 1, theta: 0.0 },
            Operation::PauliX { qubit: 1 },
            Operation::PauliY { qubit: 1 },
            Operation::PauliZ { qubit: 1 },
            Operation::Oracle { target_index: 0 },
            Operation::J,
            Operation::Repeat { count: 1, operations: vec![] },
        ];
        let tags: Vec<_> = ops.iter().map(Operation::tag).collect();
        assert_eq!(tags, ["H", "P", "X", "Y", "Z", "O", "J", "Repeat"]);
    }
}
