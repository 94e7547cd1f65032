//! Baseband conditioning after synchronous demodulation.
//!
//! Four sub-steps, in this order:
//!
//! 1. zero-phase lowpass at the message bandwidth (removes the `2·fc` image);
//! 2. zero-phase highpass at a low cutoff (removes near-DC drift and hum);
//! 3. DC removal (subtract the mean);
//! 4. peak normalization to `max |x| == 1`.
//!
//! The filters can leave a small bias at the buffer edges, so DC removal runs
//! after them. Normalization runs last to bound the output to [-1, 1].

use crate::error::{Error, Result};
use crate::filter::{FilterCoefficients, FilterSpec};
use crate::filtfilt::filtfilt;
use crate::math;
use crate::signal::Signal;

/// Lowpass/highpass settings for [`BasebandConditioner`].
///
/// # Example
///
/// ```rust
/// use portador_core::{BasebandConditioner, Signal};
///
/// let conditioner = BasebandConditioner::new(1000.0, 6, 250.0, 4);
/// let tone = Signal::from_fn(44100, 44100, |t| 0.2 + (2.0 * std::f64::consts::PI * 440.0 * t).cos()).unwrap();
/// let out = conditioner.condition(&tone).unwrap();
/// let peak = out.samples().iter().fold(0.0f64, |m, x| m.max(x.abs()));
/// assert!((peak - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasebandConditioner {
    lowpass_cutoff_hz: f64,
    lowpass_order: usize,
    highpass_cutoff_hz: f64,
    highpass_order: usize,
}

impl BasebandConditioner {
    /// Creates a conditioner. Cutoffs are validated when a filter is designed
    /// against a concrete sample rate.
    pub fn new(
        lowpass_cutoff_hz: f64,
        lowpass_order: usize,
        highpass_cutoff_hz: f64,
        highpass_order: usize,
    ) -> Self {
        Self {
            lowpass_cutoff_hz,
            lowpass_order,
            highpass_cutoff_hz,
            highpass_order,
        }
    }

    /// Lowpass cutoff in Hz.
    pub fn lowpass_cutoff_hz(&self) -> f64 {
        self.lowpass_cutoff_hz
    }

    /// Highpass cutoff in Hz.
    pub fn highpass_cutoff_hz(&self) -> f64 {
        self.highpass_cutoff_hz
    }

    /// Lowpass coefficients for `sample_rate`.
    pub fn lowpass_coefficients(&self, sample_rate: u32) -> Result<FilterCoefficients> {
        FilterSpec::lowpass(self.lowpass_cutoff_hz, self.lowpass_order, sample_rate).design()
    }

    /// Highpass coefficients for `sample_rate`.
    pub fn highpass_coefficients(&self, sample_rate: u32) -> Result<FilterCoefficients> {
        FilterSpec::highpass(self.highpass_cutoff_hz, self.highpass_order, sample_rate).design()
    }

    /// Step 1: zero-phase lowpass.
    pub fn lowpass(&self, signal: &Signal) -> Result<Signal> {
        let coeffs = self.lowpass_coefficients(signal.sample_rate())?;
        filtfilt(signal, &coeffs)
    }

    /// Step 2: zero-phase highpass.
    pub fn highpass(&self, signal: &Signal) -> Result<Signal> {
        let coeffs = self.highpass_coefficients(signal.sample_rate())?;
        filtfilt(signal, &coeffs)
    }

    /// Steps 3 and 4: DC removal then peak normalization.
    pub fn finish(&self, signal: &Signal) -> Result<Signal> {
        normalize_peak(&remove_dc(signal))
    }

    /// Runs all four steps.
    pub fn condition(&self, signal: &Signal) -> Result<Signal> {
        let lowpassed = self.lowpass(signal)?;
        let highpassed = self.highpass(&lowpassed)?;
        self.finish(&highpassed)
    }
}

/// Subtracts the arithmetic mean from every sample.
pub fn remove_dc(signal: &Signal) -> Signal {
    let offset = math::mean(signal.samples());
    signal.with_samples(signal.samples().iter().map(|&x| x - offset).collect())
}

/// Divides every sample by the largest absolute sample value.
///
/// # Errors
///
/// - [`Error::NonFiniteSample`] if any sample is NaN or infinite.
/// - [`Error::SilentSignal`] if every sample is zero.
pub fn normalize_peak(signal: &Signal) -> Result<Signal> {
    if let Some(index) = signal.samples().iter().position(|x| !x.is_finite()) {
        return Err(Error::NonFiniteSample { index });
    }
    let peak = math::peak(signal.samples());
    if peak == 0.0 {
        return Err(Error::SilentSignal);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(peak, "peak normalization");

    Ok(signal.with_samples(signal.samples().iter().map(|&x| x / peak).collect()))
}
