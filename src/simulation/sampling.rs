// src/simulation/sampling.rs

//! Measurement sampling over a register's amplitude vector.
//!
//! This is the only stochastic part of the crate. The random source is
//! always supplied by the caller, so a seeded generator makes every result
//! reproducible.

use crate::core::basis_label;
use crate::simulation::register::Register;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Draws one basis-state index.
///
/// A uniform `u` in `[0, 1)` is compared against the running sum of
/// `|aᵢ|²` in index order and the first index whose cumulative mass exceeds
/// `u` wins. If rounding (or an unnormalised vector) keeps the sum from ever
/// exceeding `u`, the last index is returned.
///
/// The comparison is strict (`u < cumulative`, not `u <= cumulative`), so a
/// zero-probability state is never drawn, even when `u` is exactly `0.0`.
pub fn measure_index<R: Rng>(register: &Register, rng: &mut R) -> usize {
    let u: f64 = rng.random();
    let mut cumulative = 0.0;
    for (i, amplitude) in register.amplitudes().iter().enumerate() {
        cumulative += amplitude.norm_sqr();
        if u < cumulative {
            return i;
        }
    }
    register.state_count() - 1
}

/// Draws one outcome and returns its label, e.g. `|010>`.
pub fn measure_once<R: Rng>(register: &Register, rng: &mut R) -> String {
    basis_label(measure_index(register, rng), register.qubit_count())
}

/// Samples the register `measurement_count` times and returns the relative
/// frequency of every observed label. Zero measurements give an empty
/// distribution.
pub fn estimate_distribution<R: Rng>(register: &Register, rng: &mut R) -> MeasurementDistribution {
    let trials = register.measurement_count();
    let mut tally: BTreeMap<usize, usize> = BTreeMap::new();
    for _ in 0..trials {
        *tally.entry(measure_index(register, rng)).or_insert(0) += 1;
    }
    let frequencies = tally
        .into_iter()
        .map(|(index, count)| (basis_label(index, register.qubit_count()), count as f64 / trials as f64))
        .collect();
    MeasurementDistribution { frequencies }
}

/// Relative frequency per observed basis-state label. Labels iterate in
/// ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementDistribution {
    frequencies: BTreeMap<String, f64>,
}

impl MeasurementDistribution {
    /// Frequency of `label`, or `None` if it was never observed.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.frequencies.get(label).copied()
    }

    /// Number of distinct labels observed.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.frequencies.iter().map(|(label, freq)| (label.as_str(), *freq))
    }

    /// Sum of all frequencies; 1 up to rounding unless empty.
    pub fn total(&self) -> f64 {
        self.frequencies.values().sum()
    }

}

impl fmt::Display for MeasurementDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (label, freq)) in self.frequencies.iter().enumerate() {
            write!(f, "{}{}:{:?}%", if i > 0 { ", " } else { "" }, label, freq * 100.0)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{QregResult, FRAC_1_SQRT_2};
    use num_complex::Complex64;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_basis_state_is_always_measured() -> QregResult<()> {
        let mut rng = StdRng::seed_from_u64(7);
        for index in 0..8 {
            let register = Register::with_basis_state(3, 500, index)?;
            let distribution = estimate_distribution(&register, &mut rng);
            assert_eq!(distribution.len(), 1);
            assert_eq!(distribution.get(&basis_label(index, 3)), Some(1.0));
        }
        Ok(())
    }

    #[test]
    fn test_zero_vector_falls_back_to_last_index() -> QregResult<()> {
        let register = Register::new(2, 10)?;
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(measure_index(&register, &mut rng), 3);
        assert_eq!(measure_once(&register, &mut rng), "|11>");
        Ok(())
    }

    #[test]
    fn test_zero_measurements_give_empty_distribution() -> QregResult<()> {
        let register = Register::with_basis_state(3, 0, 0)?;
        let distribution = estimate_distribution(&register, &mut StdRng::seed_from_u64(3));
        assert!(distribution.is_empty());
        assert_eq!(distribution.to_string(), "[]");
        Ok(())
    }

    #[test]
    fn test_seeded_runs_are_reproducible() -> QregResult<()> {
        let mut register = Register::new(2, 200)?;
        register.set_amplitudes(vec![Complex64::new(0.5, 0.0); 4])?;
        let first = estimate_distribution(&register, &mut StdRng::seed_from_u64(99));
        let second = estimate_distribution(&register, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
        assert!((first.total() - 1.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_cat_state_splits_evenly() -> QregResult<()> {
        let mut register = Register::new(3, 20_000)?;
        register.amplitudes_mut()[0] = Complex64::new(FRAC_1_SQRT_2, 0.0);
        register.amplitudes_mut()[7] = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let distribution = estimate_distribution(&register, &mut StdRng::seed_from_u64(2024));
        assert_eq!(distribution.len(), 2);
        for label in ["|000>", "|111>"] {
            let freq = distribution.get(label).unwrap_or(0.0);
            assert!((freq - 0.5).abs() <= 0.05, "{} observed with frequency {}", label, freq);
        }
        Ok(())
    }

    #[test]
    fn test_display_lists_percentages() {
        let distribution = MeasurementDistribution {
            frequencies: BTreeMap::from([("|111>".to_string(), 0.5), ("|000>".to_string(), 0.5)]),
        };
        assert_eq!(distribution.to_string(), "[|000>:50.0%, |111>:50.0%]");
    }

    #[test]
    fn test_display_prints_percentages_without_fixed_precision() {
        let distribution = MeasurementDistribution {
            frequencies: BTreeMap::from([
                ("|00>".to_string(), 0.3),
                ("|01>".to_string(), 0.0625),
                ("|10>".to_string(), 1.0),
            ]),
        };
        assert_eq!(distribution.to_string(), "[|00>:30.000000000000004%, |01>:6.25%, |10>:100.0%]");
    }
}
