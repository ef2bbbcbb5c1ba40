// src/vm/executor.rs

//! The single entry point turning a [`Program`] into a result.

use super::interpreter::Interpreter;
use super::program::Program;
use crate::core::{
    QregError, QregResult, DEFAULT_MAX_QUBITS, DEFAULT_MAX_REPEAT_DEPTH, DEFAULT_MEASUREMENTS, DEFAULT_QUBITS,
};
use crate::simulation::{MeasurementDistribution, Register};
use crate::validation;
use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Limits and defaults applied by an [`Executor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Qubit count for programs without `num_qbits`.
    pub default_qubits: usize,
    /// Sample count for programs without `num_measures`.
    pub default_measurements: usize,
    /// Largest qubit count accepted.
    pub max_qubits: usize,
    /// Deepest `Repeat` nesting accepted.
    pub max_repeat_depth: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            default_qubits: DEFAULT_QUBITS,
            default_measurements: DEFAULT_MEASUREMENTS,
            max_qubits: DEFAULT_MAX_QUBITS,
            max_repeat_depth: DEFAULT_MAX_REPEAT_DEPTH,
        }
    }
}

impl ExecutorConfig {
    /// Loads a config document. Absent fields keep their defaults.
    pub fn from_json(body: &str) -> QregResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    #[must_use]
    pub fn with_default_qubits(mut self, qubits: usize) -> Self {
        self.default_qubits = qubits;
        self
    }

    #[must_use]
    pub fn with_default_measurements(mut self, measurements: usize) -> Self {
        self.default_measurements = measurements;
        self
    }

    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    #[must_use]
    pub fn with_max_repeat_depth(mut self, depth: usize) -> Self {
        self.max_repeat_depth = depth;
        self
    }
}

/// Final amplitudes plus sampled statistics of one program run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Amplitude vector after every operation ran.
    pub final_vector: Vec<Complex64>,
    /// Relative frequency per observed basis-state label.
    pub states: MeasurementDistribution,
}

/// Builds a register from a program, runs its operations and samples the
/// final state.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    /// An executor with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Runs `program`, sampling with the thread-local generator.
    pub fn run(&self, program: &Program) -> QregResult<ExecutionResult> {
        self.run_with_rng(program, &mut rand::rng())
    }

    /// Runs `program`, drawing measurement samples from `rng`.
    ///
    /// 1. Resolves qubit and measurement counts, defaulting absent ones.
    /// 2. Builds the register and loads the initial vector verbatim.
    /// 3. Interprets the operations.
    /// 4. Returns the final vector and the sampled distribution.
    ///
    /// # Errors
    /// * `QubitLimitExceeded` above the configured qubit cap.
    /// * `NestingTooDeep` if `Repeat` nesting exceeds the configured cap.
    ///   This is checked up front, so no operation runs.
    /// * `LengthMismatch` if the initial vector is not `2^qubits` long.
    ///   Nothing runs in that case.
    /// * `IndexOutOfRange` from the interpreter.
    #[instrument(skip_all)]
    pub fn run_with_rng<R: Rng>(&self, program: &Program, rng: &mut R) -> QregResult<ExecutionResult> {
        let qubits = program.qubit_count().unwrap_or(self.config.default_qubits);
        let measurements = program.measurement_count().unwrap_or(self.config.default_measurements);
        if qubits > self.config.max_qubits {
            return Err(QregError::QubitLimitExceeded { requested: qubits, limit: self.config.max_qubits });
        }

        let interpreter = Interpreter::with_max_depth(self.config.max_repeat_depth);
        if program.nesting_depth() > interpreter.max_depth() {
            return Err(QregError::NestingTooDeep { limit: interpreter.max_depth() });
        }

        let mut register = Register::new(qubits, measurements)?;
        register.set_amplitudes(program.initial_vector().to_vec())?;
        if !validation::is_normalized(register.amplitudes(), None) {
            let total = validation::total_probability(register.amplitudes());
            warn!(total, "initial vector is not normalized; running anyway");
        }

        debug!(
            qubits,
            measurements,
            operations = program.operations().len(),
            applications = program.application_count(),
            "running program"
        );
        interpreter.execute(&mut register, program.operations())?;

        let states = register.estimate_distribution(rng);
        debug!(observed = states.len(), "program finished");
        Ok(ExecutionResult { final_vector: register.into_amplitudes(), states })
    }

    /// Decodes a JSON program, runs it and encodes the result as JSON
    /// (`{"final_vector": [[re, im], …], "states": {"|001>": 1.0}}`).
    pub fn run_json(&self, body: &str) -> QregResult<String> {
        let program = Program::from_json(body)?;
        let result = self.run(&program)?;
        Ok(serde_json::to_string(&result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Operation;
    use crate::vm::ProgramBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn basis(len: usize, index: usize) -> Vec<Complex64> {
        let mut v = vec![Complex64::new(0.0, 0.0); len];
        v[index] = Complex64::new(1.0, 0.0);
        v
    }

    #[test]
    fn test_defaults_apply_when_counts_missing() -> QregResult<()> {
        let program = ProgramBuilder::new().initial_vector(basis(8, 1)).build()?;
        let result = Executor::new().run_with_rng(&program, &mut StdRng::seed_from_u64(5))?;
        assert_eq!(result.final_vector, basis(8, 1));
        assert_eq!(result.states.get("|001>"), Some(1.0));
        assert_eq!(result.states.len(), 1);
        Ok(())
    }

    #[test]
    fn test_length_mismatch_fails_before_running() -> QregResult<()> {
        let program = ProgramBuilder::new()
            .qubits(3)
            .initial_vector(basis(4, 0))
            .add(Operation::Oracle { target_index: 99 })
            .build()?;
        let err = Executor::new().run(&program).unwrap_err();
        assert_eq!(err, QregError::LengthMismatch { expected: 8, found: 4 });
        Ok(())
    }

    #[test]
    fn test_qubit_cap() -> QregResult<()> {
        let executor = Executor::with_config(ExecutorConfig::default().with_max_qubits(2));
        let program = ProgramBuilder::new().qubits(3).initial_vector(basis(8, 0)).build()?;
        assert_eq!(
            executor.run(&program).unwrap_err(),
            QregError::QubitLimitExceeded { requested: 3, limit: 2 }
        );
        Ok(())
    }

    #[test]
    fn test_deep_nesting_is_rejected_before_any_operation() -> QregResult<()> {
        let nested = (0..3).fold(Operation::J, |inner, _| Operation::Repeat { count: 1, operations: vec![inner] });
        // The out-of-range qubit would fail first if operations ran.
        let program = ProgramBuilder::new()
            .qubits(2)
            .initial_vector(basis(4, 0))
            .add(Operation::Hadamard { qubit: 9 })
            .add(nested)
            .build()?;
        let executor = Executor::with_config(ExecutorConfig::default().with_max_repeat_depth(2));
        assert_eq!(executor.run(&program).unwrap_err(), QregError::NestingTooDeep { limit: 2 });

        let relaxed = Executor::with_config(ExecutorConfig::default().with_max_repeat_depth(3));
        assert!(matches!(relaxed.run(&program), Err(QregError::IndexOutOfRange { index: 9, .. })));
        Ok(())
    }

    #[test]
    fn test_config_defaults_are_configurable() -> QregResult<()> {
        let config = ExecutorConfig::from_json(r#"{"default_qubits": 1, "default_measurements": 7}"#)?;
        assert_eq!(config.max_qubits, DEFAULT_MAX_QUBITS);
        let program = ProgramBuilder::new().initial_vector(basis(2, 1)).build()?;
        let result = Executor::with_config(config).run_with_rng(&program, &mut StdRng::seed_from_u64(1))?;
        assert_eq!(result.states.get("|1>"), Some(1.0));
        Ok(())
    }

    #[test]
    fn test_run_json_emits_wire_shape() -> QregResult<()> {
        let body = r#"{"num_qbits": 1, "num_measures": 4, "initial_vector": [0, 1], "operations": [{"op": "X", "qbit": 1}]}"#;
        let out: serde_json::Value = serde_json::from_str(&Executor::new().run_json(body)?)?;
        assert_eq!(out["final_vector"], serde_json::json!([[1.0, 0.0], [0.0, 0.0]]));
        assert_eq!(out["states"], serde_json::json!({"|0>": 1.0}));
        Ok(())
    }
}
