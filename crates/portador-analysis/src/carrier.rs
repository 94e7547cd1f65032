//! Carrier frequency estimation from the two strongest spectral lines.
//!
//! The signal is Hann-windowed, transformed whole, and the two largest
//! magnitude bins among the non-negative frequencies are averaged:
//!
//! ```text
//! (f1, f2) = two strongest bins, f1 ≤ f2
//! fc       = (f1 + f2) / 2
//! ```
//!
//! For a suppressed-carrier signal the two lines are the sidebands, which
//! straddle the carrier symmetrically. For a single dominant tone they are the
//! tone bin and its strongest leakage neighbor, so the estimate lands within
//! half a bin of the tone. With more than two comparable lines the estimate is
//! meaningless; this heuristic is intentionally not refined.

use crate::fft::Window;
use crate::spectrum::{Peak, Spectrum};
use portador_core::{Error, Result, Signal};

/// Smallest signal length whose spectrum has two bins.
pub const MIN_SAMPLES: usize = 4;

/// Estimated carrier frequency and the two lines it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierEstimate {
    /// Estimated carrier frequency in Hz.
    pub frequency_hz: f64,
    /// Contributing peaks, ascending by frequency.
    pub peaks: [Peak; 2],
    /// Bin spacing of the spectrum the peaks came from.
    pub bin_width_hz: f64,
}

impl CarrierEstimate {
    /// Lower contributing peak.
    pub fn lower(&self) -> Peak {
        self.peaks[0]
    }

    /// Upper contributing peak.
    pub fn upper(&self) -> Peak {
        self.peaks[1]
    }

    /// Distance between the two contributing peaks in Hz.
    pub fn spread_hz(&self) -> f64 {
        self.peaks[1].frequency_hz - self.peaks[0].frequency_hz
    }
}

/// Two-peak carrier estimator.
///
/// # Example
///
/// ```rust
/// use portador_analysis::CarrierEstimator;
/// use portador_core::Signal;
/// use std::f64::consts::PI;
///
/// // 440 Hz message on a suppressed 1000 Hz carrier: sidebands at 560 and 1440 Hz
/// let am = Signal::from_fn(44100, 44100, |t| {
///     (2.0 * PI * 440.0 * t).cos() * (2.0 * PI * 1000.0 * t).cos()
/// })
/// .unwrap();
/// let estimate = CarrierEstimator::new().estimate(&am).unwrap();
/// assert_eq!(estimate.frequency_hz, 1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarrierEstimator {
    window: Window,
}

impl CarrierEstimator {
    /// Estimator with a Hann window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `window` instead of Hann.
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Window applied before the transform.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Spectrum the estimate is taken from.
    pub fn spectrum(&self, signal: &Signal) -> Spectrum {
        Spectrum::from_signal(signal, self.window)
    }

    /// Estimates the carrier frequency of `signal`.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] for fewer than [`MIN_SAMPLES`] samples.
    pub fn estimate(&self, signal: &Signal) -> Result<CarrierEstimate> {
        self.estimate_with_spectrum(signal).map(|(_, estimate)| estimate)
    }

    /// Like [`estimate`](Self::estimate), also returning the spectrum the
    /// peaks were picked from.
    pub fn estimate_with_spectrum(&self, signal: &Signal) -> Result<(Spectrum, CarrierEstimate)> {
        if signal.len() < MIN_SAMPLES {
            return Err(Error::InsufficientData {
                len: signal.len(),
                required: MIN_SAMPLES,
            });
        }
        let spectrum = self.spectrum(signal);
        let estimate = estimate_from_spectrum(&spectrum)?;
        Ok((spectrum, estimate))
    }
}

/// Averages the two strongest bins of `spectrum`.
///
/// # Errors
///
/// [`Error::InsufficientData`] if the spectrum has fewer than two bins.
pub fn estimate_from_spectrum(spectrum: &Spectrum) -> Result<CarrierEstimate> {
    let top = spectrum.strongest_bins(2);
    let [first, second] = top[..] else {
        return Err(Error::InsufficientData {
            len: spectrum.fft_size(),
            required: MIN_SAMPLES,
        });
    };

    let (lo, hi) = if first <= second {
        (first, second)
    } else {
        (second, first)
    };
    let peaks = [spectrum.peak_at(lo), spectrum.peak_at(hi)];
    let frequency_hz = (peaks[0].frequency_hz + peaks[1].frequency_hz) / 2.0;

    tracing::info!(
        carrier_hz = frequency_hz,
        lower_hz = peaks[0].frequency_hz,
        upper_hz = peaks[1].frequency_hz,
        "carrier estimated"
    );

    Ok(CarrierEstimate {
        frequency_hz,
        peaks,
        bin_width_hz: spectrum.bin_width(),
    })
}
