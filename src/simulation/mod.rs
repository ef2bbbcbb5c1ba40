// src/simulation/mod.rs

//! State evolution and measurement for a dense quantum register.
//!
//! [`Register`] owns the amplitude vector and applies gates to it through
//! operators built by [`operator::build_operator`]; [`sampling`] turns the
//! final vector into measurement statistics.

pub mod operator;
pub mod register;
pub mod sampling;

pub use operator::{build_operator, Operator};
pub use register::Register;
pub use sampling::{estimate_distribution, measure_index, measure_once, MeasurementDistribution};
