//! Filter specifications and rational transfer-function coefficients.

use crate::butterworth;
use crate::error::Result;
use core::f64::consts::PI;
use num_complex::Complex64;

/// Response shape of a filter, with its cutoff frequencies in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    /// Passes frequencies below `cutoff_hz`.
    Lowpass {
        /// -3 dB cutoff in Hz.
        cutoff_hz: f64,
    },
    /// Passes frequencies above `cutoff_hz`.
    Highpass {
        /// -3 dB cutoff in Hz.
        cutoff_hz: f64,
    },
    /// Passes frequencies between `low_hz` and `high_hz`.
    Bandpass {
        /// Lower -3 dB edge in Hz.
        low_hz: f64,
        /// Upper -3 dB edge in Hz.
        high_hz: f64,
    },
}

impl FilterKind {
    /// Short lowercase name, used in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Lowpass { .. } => "lowpass",
            FilterKind::Highpass { .. } => "highpass",
            FilterKind::Bandpass { .. } => "bandpass",
        }
    }
}

/// Immutable description of a filter to design: kind, order and the sample
/// rate the cutoffs refer to.
///
/// # Example
///
/// ```rust
/// use portador_core::FilterSpec;
///
/// let spec = FilterSpec::bandpass(400.0, 1600.0, 6, 44100);
/// let coeffs = spec.design().unwrap();
/// assert_eq!(coeffs.feedforward().len(), 13);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    kind: FilterKind,
    order: usize,
    sample_rate: u32,
}

impl FilterSpec {
    /// Creates a filter specification.
    pub fn new(kind: FilterKind, order: usize, sample_rate: u32) -> Self {
        Self {
            kind,
            order,
            sample_rate,
        }
    }

    /// Lowpass with a single cutoff in Hz.
    pub fn lowpass(cutoff_hz: f64, order: usize, sample_rate: u32) -> Self {
        Self::new(FilterKind::Lowpass { cutoff_hz }, order, sample_rate)
    }

    /// Highpass with a single cutoff in Hz.
    pub fn highpass(cutoff_hz: f64, order: usize, sample_rate: u32) -> Self {
        Self::new(FilterKind::Highpass { cutoff_hz }, order, sample_rate)
    }

    /// Bandpass between `low_hz` and `high_hz`.
    pub fn bandpass(low_hz: f64, high_hz: f64, order: usize, sample_rate: u32) -> Self {
        Self::new(FilterKind::Bandpass { low_hz, high_hz }, order, sample_rate)
    }

    /// Filter kind and cutoffs.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Prototype order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Design sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Half the design sample rate, in Hz.
    pub fn nyquist(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// Designs Butterworth coefficients for this specification.
    pub fn design(&self) -> Result<FilterCoefficients> {
        butterworth::design(self)
    }
}

/// Feedforward (`b`) and feedback (`a`) coefficients of
///
/// ```text
///         b[0] + b[1] z^-1 + ... + b[M] z^-M
/// H(z) = ------------------------------------
///         a[0] + a[1] z^-1 + ... + a[N] z^-N
/// ```
///
/// Stored normalized so that `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

#[allow(clippy::len_without_is_empty)]
impl FilterCoefficients {
    /// Creates coefficients, normalizing both sequences by `a[0]`.
    ///
    /// # Panics
    ///
    /// Panics if `b` or `a` is empty or `a[0]` is zero.
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        assert!(!b.is_empty(), "feedforward coefficients must not be empty");
        assert!(
            a.first().is_some_and(|&a0| a0 != 0.0),
            "leading feedback coefficient must be non-zero"
        );

        let a0_inv = 1.0 / a[0];
        Self {
            b: b.iter().map(|&c| c * a0_inv).collect(),
            a: a.iter().map(|&c| c * a0_inv).collect(),
        }
    }

    /// Passthrough coefficients: `y[n] = x[n]`.
    pub fn identity() -> Self {
        Self {
            b: vec![1.0],
            a: vec![1.0],
        }
    }

    /// Feedforward (numerator) coefficients.
    pub fn feedforward(&self) -> &[f64] {
        &self.b
    }

    /// Feedback (denominator) coefficients, `a[0] == 1`.
    pub fn feedback(&self) -> &[f64] {
        &self.a
    }

    /// Length of the longer coefficient sequence.
    pub fn len(&self) -> usize {
        self.b.len().max(self.a.len())
    }

    /// Evaluates H(e^jω) at `freq_hz` for the given sample rate.
    pub fn frequency_response(&self, freq_hz: f64, sample_rate: f64) -> Complex64 {
        let omega = 2.0 * PI * freq_hz / sample_rate;
        let z_inv = Complex64::from_polar(1.0, -omega);
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z_inv + c)
        };
        eval(&self.b) / eval(&self.a)
    }

    /// Magnitude of the frequency response at `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        self.frequency_response(freq_hz, sample_rate).norm()
    }
}
