//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Which index space an out-of-range index was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// A 1-based qubit index, valid in `1..=qubit_count`.
    Qubit,
    /// A 0-based basis-state index, valid in `0..state_count`.
    BasisState,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Qubit => write!(f, "qubit"),
            IndexKind::BasisState => write!(f, "basis state"),
        }
    }
}

/// Errors raised while building, running or decoding register programs.
///
/// Every failure is fatal to the call that produced it. Nothing in the crate
/// retries or falls back to a default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QregError {
    /// A qubit index or basis-state index fell outside its valid range.
    #[error("{kind} index {index} out of range ({})", valid_range(.kind, .bound))]
    IndexOutOfRange {
        /// Index space the value was checked against.
        kind: IndexKind,
        /// The offending index.
        index: usize,
        /// Qubit count for `Qubit`, state count for `BasisState`.
        bound: usize,
    },

    /// An operation tag outside the recognised set.
    #[error("unknown operation '{tag}'")]
    UnknownOperation {
        /// The tag as it appeared in the program.
        tag: String,
    },

    /// The initial vector does not have `2^qubit_count` entries.
    #[error("initial vector has {found} amplitudes, expected {expected}")]
    LengthMismatch {
        /// Required length (the register's state count).
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },

    /// A required field is missing or a field is malformed.
    #[error("invalid program: {message}")]
    InvalidProgramShape {
        /// What was wrong with the program.
        message: String,
    },

    /// The requested register is larger than the configured cap.
    #[error("{requested} qubits requested, limit is {limit}")]
    QubitLimitExceeded {
        /// Qubit count asked for.
        requested: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// `Repeat` operations are nested deeper than the configured cap.
    #[error("repeat nesting exceeds the limit of {limit} levels")]
    NestingTooDeep {
        /// Configured maximum nesting depth.
        limit: usize,
    },
}

impl QregError {
    pub(crate) fn qubit_out_of_range(qubit: usize, qubit_count: usize) -> Self {
        QregError::IndexOutOfRange { kind: IndexKind::Qubit, index: qubit, bound: qubit_count }
    }

    pub(crate) fn state_out_of_range(index: usize, state_count: usize) -> Self {
        QregError::IndexOutOfRange { kind: IndexKind::BasisState, index, bound: state_count }
    }

    pub(crate) fn invalid_shape(message: impl Into<String>) -> Self {
        QregError::InvalidProgramShape { message: message.into() }
    }
}

fn valid_range(kind: &IndexKind, bound: &usize) -> String {
    match kind {
        IndexKind::Qubit => format!("valid 1..={}", bound),
        IndexKind::BasisState => format!("valid 0..{}", bound),
    }
}

impl From<serde_json::Error> for QregError {
    fn from(err: serde_json::Error) -> Self {
        QregError::invalid_shape(err.to_string())
    }
}

/// Result type used throughout the crate.
pub type QregResult<T> = Result<T, QregError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_messages_name_the_valid_range() {
        let qubit = QregError::qubit_out_of_range(4, 3);
        assert_eq!(qubit.to_string(), "qubit index 4 out of range (valid 1..=3)");

        let state = QregError::state_out_of_range(8, 8);
        assert_eq!(state.to_string(), "basis state index 8 out of range (valid 0..8)");
    }

    #[test]
    fn test_json_errors_become_shape_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(QregError::from(err), QregError::InvalidProgramShape { .. }));
    }
}
