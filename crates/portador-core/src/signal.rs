//! Sampled real-valued signal with its sample rate.

use crate::error::{Error, Result};

/// An ordered buffer of real samples captured at a fixed sample rate.
///
/// Invariants: the sample rate is positive and the buffer holds at least one
/// sample. Both are checked by [`Signal::new`]; every processing stage in the
/// workspace returns a new `Signal` of the same length and rate.
///
/// # Example
///
/// ```rust
/// use portador_core::Signal;
///
/// let tone = Signal::from_fn(8000, 800, |t| (2.0 * std::f64::consts::PI * 100.0 * t).sin()).unwrap();
/// assert_eq!(tone.len(), 800);
/// assert_eq!(tone.sample_rate(), 8000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: u32,
}

// Never empty by construction, so no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl Signal {
    /// Creates a signal, validating the rate and length invariants.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidSignal {
                reason: "sample rate must be positive",
            });
        }
        if samples.is_empty() {
            return Err(Error::InvalidSignal {
                reason: "signal must hold at least one sample",
            });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Creates a signal of `len` samples by evaluating `f` at each sample time
    /// `t = i / sample_rate` in seconds.
    pub fn from_fn(sample_rate: u32, len: usize, mut f: impl FnMut(f64) -> f64) -> Result<Self> {
        let fs = f64::from(sample_rate);
        let samples = (0..len).map(|i| f(i as f64 / fs)).collect();
        Self::new(samples, sample_rate)
    }

    /// Returns a signal with the same sample rate and new samples.
    ///
    /// Stages only ever produce same-length output, so the non-empty invariant
    /// carries over from `self`.
    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> Self {
        debug_assert_eq!(samples.len(), self.samples.len());
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Sample values.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consumes the signal, returning its sample buffer.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Half the sample rate, in Hz.
    pub fn nyquist(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Sample times in seconds, aligned with [`samples`](Self::samples).
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        let fs = f64::from(self.sample_rate);
        (0..self.samples.len()).map(move |i| i as f64 / fs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sample_rate() {
        let err = Signal::new(vec![0.0; 4], 0).unwrap_err();
        assert!(matches!(err, Error::InvalidSignal { .. }));
    }

    #[test]
    fn rejects_empty_buffer() {
        let err = Signal::new(Vec::new(), 48000).unwrap_err();
        assert!(matches!(err, Error::InvalidSignal { .. }));
    }

    #[test]
    fn from_fn_evaluates_at_sample_times() {
        let signal = Signal::from_fn(4, 4, |t| t).unwrap();
        assert_eq!(signal.samples(), &[0.0, 0.25, 0.5, 0.75]);
        assert_eq!(signal.duration_secs(), 1.0);
        assert_eq!(signal.nyquist(), 2.0);
    }

    #[test]
    fn times_match_sample_rate() {
        let signal = Signal::new(vec![1.0; 3], 2).unwrap();
        let times: Vec<f64> = signal.times().collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }
}
