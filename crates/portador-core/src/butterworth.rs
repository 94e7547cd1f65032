//! Butterworth (maximally flat) IIR filter design.
//!
//! Design proceeds entirely in zeros/poles/gain form and only expands to
//! polynomial coefficients at the end:
//!
//! 1. Analog lowpass prototype with poles evenly spaced on the left half of
//!    the unit circle.
//! 2. Frequency transform to the target response (lowpass, highpass,
//!    bandpass), using cutoffs pre-warped for the bilinear transform.
//! 3. Bilinear transform `s = 2·fs·(z - 1)/(z + 1)`.
//! 4. Polynomial expansion of zeros and poles into `b` and `a`.
//!
//! Cutoffs are normalized by Nyquist before step 2, so the design sample
//! rate is fixed at 2. A bandpass of order `n` produces `2n + 1`
//! coefficients; lowpass and highpass produce `n + 1`.
//!
//! Expanding many clustered poles into one polynomial is ill-conditioned, so
//! the expanded coefficients are checked before they are returned: the
//! impulse response of `1/A(z)` must decay, and the gain at the passband
//! reference frequency (DC, Nyquist, or the band center) must stay within
//! 10% of unity.
//!
//! The whole computation is plain `f64` arithmetic with no caching, so the
//! same [`FilterSpec`] always yields bit-identical coefficients.
//!
//! Reference: A. V. Oppenheim, R. W. Schafer, *Discrete-Time Signal
//! Processing*, 3rd ed., Section 7.2 (Bilinear Transformation).

use crate::error::{Error, Result};
use crate::filter::{FilterCoefficients, FilterKind, FilterSpec};
use core::f64::consts::PI;
use num_complex::Complex64;

/// Sample rate of the normalized design domain (Nyquist = 1).
const DESIGN_FS: f64 = 2.0;

/// Largest accepted deviation of the realized reference gain from 1.
const PASSBAND_GAIN_TOLERANCE: f64 = 0.1;

/// Bounds on the impulse response length run by the decay check.
const MIN_DECAY_SAMPLES: usize = 256;
const MAX_DECAY_SAMPLES: usize = 400_000;

/// Time constants of the slowest designed pole covered by the decay check.
const DECAY_TIME_CONSTANTS: f64 = 40.0;

/// Zeros, poles and gain of a transfer function.
#[derive(Debug, Clone)]
struct Zpk {
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    gain: f64,
}

impl Zpk {
    /// Excess of poles over zeros.
    fn degree(&self) -> usize {
        self.poles.len() - self.zeros.len()
    }
}

/// Designs Butterworth coefficients for `spec`.
///
/// # Errors
///
/// - [`Error::UnsupportedOrder`] if the order is zero.
/// - [`Error::InvalidCutoff`] if a cutoff is not strictly between 0 and
///   Nyquist, or a bandpass lower edge is not below its upper edge.
/// - [`Error::UnrealizableFilter`] if rounding in the polynomial expansion
///   left a denominator that does not decay or a passband gain off unity.
pub fn design(spec: &FilterSpec) -> Result<FilterCoefficients> {
    let order = spec.order();
    if order < 1 {
        return Err(Error::UnsupportedOrder { order });
    }

    let nyquist = spec.nyquist();
    let prototype = analog_prototype(order);

    // Second element: normalized frequency where the designed gain is exactly 1.
    let (analog, reference) = match spec.kind() {
        FilterKind::Lowpass { cutoff_hz } => {
            let wn = normalize_cutoff("lowpass", cutoff_hz, nyquist)?;
            (lowpass_to_lowpass(&prototype, prewarp(wn)), 0.0)
        }
        FilterKind::Highpass { cutoff_hz } => {
            let wn = normalize_cutoff("highpass", cutoff_hz, nyquist)?;
            (lowpass_to_highpass(&prototype, prewarp(wn)), 1.0)
        }
        FilterKind::Bandpass { low_hz, high_hz } => {
            let low = normalize_cutoff("bandpass", low_hz, nyquist)?;
            let high = normalize_cutoff("bandpass", high_hz, nyquist)?;
            if low >= high {
                return Err(Error::InvalidCutoff {
                    kind: "bandpass",
                    cutoff_hz: low_hz,
                    nyquist_hz: nyquist,
                    reason: "lower edge must be below upper edge",
                });
            }
            let (w_low, w_high) = (prewarp(low), prewarp(high));
            let center = (w_low * w_high).sqrt();
            (
                lowpass_to_bandpass(&prototype, center, w_high - w_low),
                unwarp(center),
            )
        }
    };

    let digital = bilinear(&analog);
    let coeffs = to_transfer_function(&digital);
    check_realization(spec.kind().name(), order, &coeffs, &digital, reference)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        kind = spec.kind().name(),
        order,
        sample_rate = spec.sample_rate(),
        taps = coeffs.len(),
        "butterworth design"
    );

    Ok(coeffs)
}

/// Validates `cutoff_hz` and returns it as a fraction of Nyquist.
fn normalize_cutoff(kind: &'static str, cutoff_hz: f64, nyquist_hz: f64) -> Result<f64> {
    let wn = cutoff_hz / nyquist_hz;
    if !wn.is_finite() || wn <= 0.0 || wn >= 1.0 {
        return Err(Error::InvalidCutoff {
            kind,
            cutoff_hz,
            nyquist_hz,
            reason: "must lie strictly between 0 Hz and Nyquist",
        });
    }
    Ok(wn)
}

/// Maps a normalized digital cutoff to the analog frequency that the bilinear
/// transform sends back onto it.
fn prewarp(wn: f64) -> f64 {
    2.0 * DESIGN_FS * (PI * wn / DESIGN_FS).tan()
}

/// Inverse of [`prewarp`]: the normalized digital frequency an analog
/// frequency lands on.
fn unwarp(w: f64) -> f64 {
    DESIGN_FS * (w / (2.0 * DESIGN_FS)).atan() / PI
}

/// Analog Butterworth lowpass prototype with unit cutoff.
///
/// Poles sit at `-exp(jπm / 2N)` for `m = -N+1, -N+3, ..., N-1`.
fn analog_prototype(order: usize) -> Zpk {
    let n = order as f64;
    let poles = (0..order)
        .map(|k| {
            let m = 2.0 * k as f64 - n + 1.0;
            -Complex64::from_polar(1.0, PI * m / (2.0 * n))
        })
        .collect();

    Zpk {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

fn lowpass_to_lowpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.degree();
    Zpk {
        zeros: proto.zeros.iter().map(|&z| z * wo).collect(),
        poles: proto.poles.iter().map(|&p| p * wo).collect(),
        gain: proto.gain * wo.powi(degree as i32),
    }
}

fn lowpass_to_highpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.degree();

    let mut zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| wo / z).collect();
    zeros.extend(std::iter::repeat_n(Complex64::new(0.0, 0.0), degree));
    let poles = proto.poles.iter().map(|&p| wo / p).collect();

    let num: Complex64 = proto.zeros.iter().map(|&z| -z).product();
    let den: Complex64 = proto.poles.iter().map(|&p| -p).product();

    Zpk {
        zeros,
        poles,
        gain: proto.gain * (num / den).re,
    }
}

fn lowpass_to_bandpass(proto: &Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.degree();

    // Each prototype root r splits into r·bw/2 ± sqrt((r·bw/2)² - wo²).
    let split = |roots: &[Complex64]| -> Vec<Complex64> {
        let scaled: Vec<Complex64> = roots.iter().map(|&r| r * (bw / 2.0)).collect();
        let offsets: Vec<Complex64> = scaled.iter().map(|&r| (r * r - wo * wo).sqrt()).collect();
        scaled
            .iter()
            .zip(&offsets)
            .map(|(&r, &d)| r + d)
            .chain(scaled.iter().zip(&offsets).map(|(&r, &d)| r - d))
            .collect()
    };

    let mut zeros = split(&proto.zeros);
    zeros.extend(std::iter::repeat_n(Complex64::new(0.0, 0.0), degree));

    Zpk {
        zeros,
        poles: split(&proto.poles),
        gain: proto.gain * bw.powi(degree as i32),
    }
}

/// Bilinear transform from the s-plane to the z-plane at [`DESIGN_FS`].
///
/// Zeros at infinity land on z = -1.
fn bilinear(analog: &Zpk) -> Zpk {
    let fs2 = Complex64::new(2.0 * DESIGN_FS, 0.0);
    let degree = analog.degree();

    let mut zeros: Vec<Complex64> = analog.zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
    zeros.extend(std::iter::repeat_n(Complex64::new(-1.0, 0.0), degree));
    let poles = analog.poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();

    let num: Complex64 = analog.zeros.iter().map(|&z| fs2 - z).product();
    let den: Complex64 = analog.poles.iter().map(|&p| fs2 - p).product();

    Zpk {
        zeros,
        poles,
        gain: analog.gain * (num / den).re,
    }
}

/// Expands zeros and poles into real polynomial coefficients.
///
/// Roots come in conjugate pairs, so imaginary parts of the expansion are
/// rounding residue and are dropped.
fn to_transfer_function(zpk: &Zpk) -> FilterCoefficients {
    let b = poly(&zpk.zeros).iter().map(|c| c.re * zpk.gain).collect();
    let a = poly(&zpk.poles).iter().map(|c| c.re).collect();
    FilterCoefficients::new(b, a)
}

/// Verifies that the expanded coefficients still realize the designed filter.
///
/// `reference` is the normalized frequency (Nyquist = 1) at which the designed
/// magnitude is exactly 1.
fn check_realization(
    kind: &'static str,
    order: usize,
    coeffs: &FilterCoefficients,
    digital: &Zpk,
    reference: f64,
) -> Result<()> {
    let gain = coeffs.magnitude_at(reference, DESIGN_FS);
    if gain.is_nan() || (gain - 1.0).abs() > PASSBAND_GAIN_TOLERANCE {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind, order, gain, "expanded passband gain off unity");
        return Err(Error::UnrealizableFilter {
            kind,
            order,
            reason: "passband gain drifted from unity",
        });
    }

    let slowest = digital.poles.iter().map(|p| p.norm()).fold(0.0, f64::max);
    if !impulse_decays(coeffs.feedback(), slowest) {
        return Err(Error::UnrealizableFilter {
            kind,
            order,
            reason: "impulse response does not decay",
        });
    }
    Ok(())
}

/// Runs the impulse response of `1 / A(z)` and reports whether it dies out.
///
/// The run covers [`DECAY_TIME_CONSTANTS`] time constants of the slowest
/// designed pole (`slowest_radius`); the response decays if its largest
/// magnitude over the final quarter is at most half its overall peak.
fn impulse_decays(a: &[f64], slowest_radius: f64) -> bool {
    let span = DECAY_TIME_CONSTANTS / (1.0 - slowest_radius);
    let len = if span.is_finite() && span > 0.0 {
        (span as usize).clamp(MIN_DECAY_SAMPLES, MAX_DECAY_SAMPLES)
    } else {
        MAX_DECAY_SAMPLES
    };
    let tail_start = len - len / 4;

    // history[k] = y[n - 1 - k]
    let mut history = vec![0.0; a.len().saturating_sub(1)];
    let (mut peak, mut tail) = (0.0f64, 0.0f64);
    for n in 0..len {
        let input = if n == 0 { 1.0 } else { 0.0 };
        let y = input
            - a.iter()
                .skip(1)
                .zip(&history)
                .map(|(c, past)| c * past)
                .sum::<f64>();
        if !y.is_finite() {
            return false;
        }
        history.rotate_right(1);
        if let Some(latest) = history.first_mut() {
            *latest = y;
        }
        peak = peak.max(y.abs());
        if n >= tail_start {
            tail = tail.max(y.abs());
        }
    }
    tail <= 0.5 * peak
}

/// Coefficients of `∏ (x - r)`, highest power first.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = Vec::with_capacity(roots.len() + 1);
    coeffs.push(Complex64::new(1.0, 0.0));
    for &root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }
    coeffs
}
