// src/vm/mod.rs

//! Programs, the operation interpreter and the executor façade.

pub mod program;
mod interpreter;
mod executor;

pub use program::{OperationDescriptor, Program, ProgramBuilder, ProgramDescriptor, WireAmplitude};
pub use interpreter::Interpreter;
pub use executor::{ExecutionResult, Executor, ExecutorConfig};
