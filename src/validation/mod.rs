// src/validation/mod.rs

//! Checks on amplitude vectors.
//!
//! The simulator never renormalises; these helpers let callers and tests
//! confirm Σ|aᵢ|² ≈ 1 themselves.

use num_complex::Complex64;

// Default tolerance (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Σ|aᵢ|², the total measurement probability.
pub fn total_probability(amplitudes: &[Complex64]) -> f64 {
    amplitudes.iter().map(|a| a.norm_sqr()).sum()
}

/// True when the total probability is within `tolerance` of 1
/// (default 1e-9).
pub fn is_normalized(amplitudes: &[Complex64], tolerance: Option<f64>) -> bool {
    let tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    (total_probability(amplitudes) - 1.0).abs() <= tolerance
}

/// Component-wise comparison: same length and every |aᵢ - bᵢ| ≤ `tolerance`.
pub fn approx_equal_vectors(a: &[Complex64], b: &[Complex64], tolerance: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).norm() <= tolerance)
}
