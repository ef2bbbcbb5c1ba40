// src/vm/program.rs

//! Register programs and their JSON wire format.
//!
//! The canonical wire shape keeps operation parameters flat on the
//! operation object:
//!
//! ```json
//! {
//!   "num_qbits": 3,
//!   "num_measures": 100,
//!   "initial_vector": [1.0, 0, 0, 0, 0, 0, 0, 0],
//!   "operations": [
//!     {"op": "H", "qbit": 3},
//!     {"op": "P", "qbit": 3, "theta": 3.141592653589793},
//!     {"op": "Repeat", "count": 2, "operations": [{"op": "X", "qbit": 1}]}
//!   ]
//! }
//! ```
//!
//! Amplitudes are either bare numbers (real) or `[re, im]` pairs.

use crate::core::{QregError, QregResult};
use crate::operations::Operation;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded program: register shape, initial state and operations.
///
/// `qubit_count` and `measurement_count` stay optional here; the
/// [`Executor`](super::Executor) fills in its configured defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub(crate) qubit_count: Option<usize>,
    pub(crate) measurement_count: Option<usize>,
    pub(crate) initial_vector: Vec<Complex64>,
    pub(crate) operations: Vec<Operation>,
}

impl Program {
    /// Decodes a program from a JSON document.
    ///
    /// # Errors
    /// * `InvalidProgramShape` for malformed JSON, missing `initial_vector`,
    ///   or operations lacking required parameters.
    /// * `UnknownOperation` for an `op` tag outside the recognised set.
    pub fn from_json(body: &str) -> QregResult<Self> {
        let descriptor: ProgramDescriptor = serde_json::from_str(body)?;
        Program::try_from(descriptor)
    }

    /// Encodes the program in the canonical wire shape.
    pub fn to_json(&self) -> QregResult<String> {
        Ok(serde_json::to_string(&ProgramDescriptor::from(self))?)
    }

    pub fn qubit_count(&self) -> Option<usize> {
        self.qubit_count
    }

    pub fn measurement_count(&self) -> Option<usize> {
        self.measurement_count
    }

    pub fn initial_vector(&self) -> &[Complex64] {
        &self.initial_vector
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Gate and operator applications once every `Repeat` is unrolled.
    pub fn application_count(&self) -> usize {
        self.operations
            .iter()
            .fold(0usize, |acc, op| acc.saturating_add(op.count_applications()))
    }

    /// Deepest `Repeat` nesting in the program; 0 when there is none.
    pub fn nesting_depth(&self) -> usize {
        self.operations.iter().map(Operation::depth).max().unwrap_or(0)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = |value: Option<usize>| value.map_or_else(|| "default".to_string(), |v| v.to_string());
        writeln!(
            f,
            "Register Program (qubits: {}, measurements: {}, {} operations)",
            shown(self.qubit_count),
            shown(self.measurement_count),
            self.operations.len()
        )?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {:04}: {}", i, op)?;
        }
        Ok(())
    }
}

// --- Program Builder ---

/// Builds [`Program`] values with a fluent API.
///
/// ```
/// # use qreg::{Operation, ProgramBuilder};
/// # use num_complex::Complex64;
/// let mut initial = vec![Complex64::new(0.0, 0.0); 8];
/// initial[0] = Complex64::new(1.0, 0.0);
///
/// let program = ProgramBuilder::new()
///     .qubits(3)
///     .measurements(1000)
///     .initial_vector(initial)
///     .add(Operation::Hadamard { qubit: 3 })
///     .build()
///     .expect("initial vector was supplied");
///
/// assert_eq!(program.operations().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    qubit_count: Option<usize>,
    measurement_count: Option<usize>,
    initial_vector: Option<Vec<Complex64>>,
    operations: Vec<Operation>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn qubits(mut self, qubit_count: usize) -> Self {
        self.qubit_count = Some(qubit_count);
        self
    }

    pub fn measurements(mut self, measurement_count: usize) -> Self {
        self.measurement_count = Some(measurement_count);
        self
    }

    pub fn initial_vector(mut self, initial_vector: Vec<Complex64>) -> Self {
        self.initial_vector = Some(initial_vector);
        self
    }

    /// Appends one operation.
    pub fn add(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Appends operations from an iterator, in order.
    pub fn add_many<I>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(operations);
        self
    }

    /// # Errors
    /// `InvalidProgramShape` if no initial vector was given.
    pub fn build(self) -> QregResult<Program> {
        let initial_vector = self
            .initial_vector
            .ok_or_else(|| QregError::invalid_shape("missing field 'initial_vector'"))?;
        Ok(Program {
            qubit_count: self.qubit_count,
            measurement_count: self.measurement_count,
            initial_vector,
            operations: self.operations,
        })
    }
}

// --- Wire format ---

/// A program as it appears on the wire, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_qbits: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_measures: Option<usize>,
    #[serde(default)]
    pub initial_vector: Option<Vec<WireAmplitude>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<OperationDescriptor>>,
}

/// One amplitude on the wire: a bare real number or an `[re, im]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAmplitude {
    Real(f64),
    Complex(Complex64),
}

impl From<WireAmplitude> for Complex64 {
    fn from(amplitude: WireAmplitude) -> Self {
        match amplitude {
            WireAmplitude::Real(re) => Complex64::new(re, 0.0),
            WireAmplitude::Complex(c) => c,
        }
    }
}

/// One operation on the wire. Which fields are required depends on `op`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qbit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<OperationDescriptor>>,
    // Parameters nested under "args" are an older shape that is not accepted.
    #[serde(default, skip_serializing)]
    args: Option<serde_json::Value>,
}

impl OperationDescriptor {
    fn require<T: Copy>(&self, value: Option<T>, field: &str) -> QregResult<T> {
        value.ok_or_else(|| {
            let hint = if self.args.is_some() {
                " (parameters must sit directly on the operation, not under 'args')"
            } else {
                ""
            };
            QregError::invalid_shape(format!("operation '{}' requires '{}'{}", self.op, field, hint))
        })
    }
}

impl TryFrom<&OperationDescriptor> for Operation {
    type Error = QregError;

    fn try_from(d: &OperationDescriptor) -> QregResult<Self> {
        let op = match d.op.as_str() {
            "H" => Operation::Hadamard { qubit: d.require(d.qbit, "qbit")? },
            "P" => Operation::Phase { qubit: d.require(d.qbit, "qbit")?, theta: d.require(d.theta, "theta")? },
            "X" => Operation::PauliX { qubit: d.require(d.qbit, "qbit")? },
            "Y" => Operation::PauliY { qubit: d.require(d.qbit, "qbit")? },
            "Z" => Operation::PauliZ { qubit: d.require(d.qbit, "qbit")? },
            "O" => Operation::Oracle { target_index: d.require(d.target, "target")? },
            "J" => Operation::J,
            "Repeat" => {
                let count = d.require(d.count, "count")?;
                let body = d
                    .operations
                    .as_ref()
                    .ok_or_else(|| QregError::invalid_shape("operation 'Repeat' requires 'operations'"))?;
                let operations = body.iter().map(Operation::try_from).collect::<QregResult<Vec<_>>>()?;
                Operation::Repeat { count, operations }
            }
            other => return Err(QregError::UnknownOperation { tag: other.to_string() }),
        };
        Ok(op)
    }
}

impl From<&Operation> for OperationDescriptor {
    fn from(op: &Operation) -> Self {
        let mut d = OperationDescriptor { op: op.tag().to_string(), ..Default::default() };
        match op {
            Operation::Hadamard { qubit }
            | Operation::PauliX { qubit }
            | Operation::PauliY { qubit }
            | Operation::PauliZ { qubit } => d.qbit = Some(*qubit),
            Operation::Phase { qubit, theta } => {
                d.qbit = Some(*qubit);
                d.theta = Some(*theta);
            }
            Operation::Oracle { target_index } => d.target = Some(*target_index),
            Operation::J => {}
            Operation::Repeat { count, operations } => {
                d.count = Some(*count);
                d.operations = Some(operations.iter().map(OperationDescriptor::from).collect());
            }
        }
        d
    }
}

impl TryFrom<ProgramDescriptor> for Program {
    type Error = QregError;

    fn try_from(d: ProgramDescriptor) -> QregResult<Self> {
        let initial_vector = d
            .initial_vector
            .ok_or_else(|| QregError::invalid_shape("missing field 'initial_vector'"))?
            .into_iter()
            .map(Complex64::from)
            .collect();
        let operations = d
            .operations
            .unwrap_or_default()
            .iter()
            .map(Operation::try_from)
            .collect::<QregResult<Vec<_>>>()?;
        Ok(Program {
            qubit_count: d.num_qbits,
            measurement_count: d.num_measures,
            initial_vector,
            operations,
        })
    }
}

impl From<&Program> for ProgramDescriptor {
    fn from(program: &Program) -> Self {
        ProgramDescriptor {
            num_qbits: program.qubit_count,
            num_measures: program.measurement_count,
            initial_vector: Some(program.initial_vector.iter().copied().map(WireAmplitude::Complex).collect()),
            operations: Some(program.operations.iter().map(OperationDescriptor::from).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_flat_operations() -> QregResult<()> {
        let program = Program::from_json(
            r#"{
                "num_qbits": 2,
                "num_measures": 10,
                "initial_vector": [1.0, 0, [0.0, 0.5], 0],
                "operations": [
                    {"op": "H", "qbit": 1},
                    {"op": "P", "qbit": 2, "theta": 0.25},
                    {"op": "O", "target": 3},
                    {"op": "J"},
                    {"op": "Repeat", "count": 2, "operations": [{"op": "Y", "qbit": 2}]}
                ]
            }"#,
        )?;
        assert_eq!(program.qubit_count(), Some(2));
        assert_eq!(program.measurement_count(), Some(10));
        assert_eq!(program.initial_vector()[2], Complex64::new(0.0, 0.5));
        assert_eq!(
            program.operations(),
            &[
                Operation::Hadamard { qubit: 1 },
                Operation::Phase { qubit: 2, theta: 0.25 },
                Operation::Oracle { target_index: 3 },
                Operation::J,
                Operation::Repeat { count: 2, operations: vec![Operation::PauliY { qubit: 2 }] },
            ]
        );
        assert_eq!(program.application_count(), 6);
        Ok(())
    }

    #[test]
    fn test_nesting_depth_is_the_deepest_repeat() -> QregResult<()> {
        let flat = Program::from_json(r#"{"initial_vector": [1, 0], "operations": [{"op": "J"}]}"#)?;
        assert_eq!(flat.nesting_depth(), 0);

        let nested = Program::from_json(
            r#"{"initial_vector": [1, 0], "operations": [
                {"op": "Repeat", "count": 1, "operations": [{"op": "X", "qbit": 1}]},
                {"op": "Repeat", "count": 2, "operations": [
                    {"op": "Repeat", "count": 3, "operations": [{"op": "J"}]}]}
            ]}"#,
        )?;
        assert_eq!(nested.nesting_depth(), 2);
        Ok(())
    }

    #[test]
    fn test_optional_fields_default_to_none() -> QregResult<()> {
        let program = Program::from_json(r#"{"initial_vector": [0, 1]}"#)?;
        assert_eq!(program.qubit_count(), None);
        assert_eq!(program.measurement_count(), None);
        assert!(program.operations().is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_tag_is_rejected_even_when_nested() {
        let err = Program::from_json(
            r#"{"initial_vector": [1, 0], "operations": [{"op": "Repeat", "count": 1, "operations": [{"op": "Q"}]}]}"#,
        )
        .unwrap_err();
        assert_eq!(err, QregError::UnknownOperation { tag: "Q".to_string() });
    }

    #[test]
    fn test_missing_initial_vector() {
        let err = Program::from_json(r#"{"num_qbits": 1}"#).unwrap_err();
        assert!(matches!(err, QregError::InvalidProgramShape { .. }));
    }

    #[test]
    fn test_nested_args_shape_is_rejected_with_hint() {
        let err = Program::from_json(r#"{"initial_vector": [1, 0], "operations": [{"op": "H", "args": {"qbit": 1}}]}"#)
            .unwrap_err();
        match err {
            QregError::InvalidProgramShape { message } => assert!(message.contains("'args'"), "{}", message),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Program::from_json("not json"), Err(QregError::InvalidProgramShape { .. })));
        assert!(matches!(
            Program::from_json(r#"{"num_qbits": -1, "initial_vector": []}"#),
            Err(QregError::InvalidProgramShape { .. })
        ));
    }

    #[test]
    fn test_encode_then_decode_preserves_program() -> QregResult<()> {
        let program = ProgramBuilder::new()
            .qubits(1)
            .initial_vector(vec![Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)])
            .add(Operation::Repeat { count: 3, operations: vec![Operation::Phase { qubit: 1, theta: 0.5 }] })
            .add(Operation::Oracle { target_index: 1 })
            .build()?;
        assert_eq!(Program::from_json(&program.to_json()?)?, program);
        Ok(())
    }

    #[test]
    fn test_builder_requires_initial_vector() {
        assert!(matches!(ProgramBuilder::new().qubits(2).build(), Err(QregError::InvalidProgramShape { .. })));
    }
}
