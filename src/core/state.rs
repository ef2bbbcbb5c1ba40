// src/core/state.rs

//! Basis-state labels and amplitude formatting.

use num_complex::Complex64;
use std::fmt;

/// Formats basis-state `index` as `|b1b2…bn>`, qubit 1 being the leftmost
/// (most significant) bit.
///
/// ```
/// assert_eq!(qreg::core::basis_label(1, 3), "|001>");
/// assert_eq!(qreg::core::basis_label(6, 3), "|110>");
/// ```
pub fn basis_label(index: usize, qubit_count: usize) -> String {
    format!("|{:0width$b}>", index, width = qubit_count)
}

/// Display adapter printing an amplitude rounded to two decimals, e.g.
/// `0.71`, `1.0`, `-0.0` or `0.0-0.71j`. The imaginary part is shown only
/// when it is significant (`im² > 1e-4`).
pub struct RoundedAmplitude(pub Complex64);

impl fmt::Display for RoundedAmplitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Complex64 { re, im } = self.0;
        write!(f, "{:?}", round2(re))?;
        if im * im > 1e-4 {
            write!(f, "{:+?}j", round2(im))?;
        }
        Ok(())
    }
}

// Halves round to even. The sign of zero is kept.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
