//! Summary statistics and level conversions over sample buffers.
//!
//! - [`mean`], [`peak`], [`rms`] - buffer statistics
//! - [`linear_to_db`] - magnitude to decibels

/// Arithmetic mean. Returns 0.0 for an empty slice.
///
/// Accumulates with Kahan compensation so that long buffers of near-cancelling
/// samples keep their residual accurately.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &x in samples {
        let y = x - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum / samples.len() as f64
}

/// Largest absolute sample value. Returns 0.0 for an empty slice.
///
/// NaN samples are skipped by the fold; callers that need finiteness check it first.
#[inline]
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0f64, |m, &x| m.max(x.abs()))
}

/// Root mean square. Returns 0.0 for an empty slice.
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|x| x * x).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Convert a linear magnitude to decibels (`20·log10`), floored at -300 dB.
///
/// # Example
/// ```rust
/// use portador_core::linear_to_db;
///
/// assert!((linear_to_db(1.0)).abs() < 1e-12);
/// assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
/// ```
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    20.0 * linear.max(1e-15).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slices_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(peak(&[]), 0.0);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn statistics_of_small_buffer() {
        let x = [1.0, -3.0, 2.0, 0.0];
        assert_eq!(mean(&x), 0.0);
        assert_eq!(peak(&x), 3.0);
        assert!((rms(&x) - (14.0f64 / 4.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn db_floor() {
        assert_eq!(linear_to_db(0.0), -300.0);
    }
}
