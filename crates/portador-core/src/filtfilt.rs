//! Zero-phase forward-backward filtering.
//!
//! The signal is filtered once forward, then the time-reversed result is
//! filtered again and reversed back. The phase shifts of the two passes cancel
//! and the magnitude response is squared, doubling the effective order.
//!
//! Edge handling:
//!
//! - the input is extended at both ends by an odd reflection of
//!   `3 · max(len(a), len(b))` samples about the end points;
//! - each pass starts from the steady-state filter state scaled to the first
//!   sample it sees, so a constant offset does not ring.
//!
//! Both passes need the whole buffer; there is no streaming form.

use crate::error::{Error, Result};
use crate::filter::FilterCoefficients;
use crate::iir::{IirFilter, steady_state};
use crate::signal::Signal;

/// Number of samples reflected at each edge for `coeffs`.
pub fn pad_len(coeffs: &FilterCoefficients) -> usize {
    3 * coeffs.len()
}

/// Applies `coeffs` forward and backward over `signal` with zero net phase.
///
/// # Errors
///
/// - [`Error::SignalTooShort`] if the signal has no more samples than the
///   edge padding, see [`pad_len`].
/// - [`Error::NonFiniteSample`] if the output holds NaN or infinity, either
///   carried in from the input or from a recursion that diverged.
///
/// # Example
///
/// ```rust
/// use portador_core::{FilterSpec, Signal, filtfilt};
///
/// let signal = Signal::from_fn(8000, 4000, |t| (2.0 * std::f64::consts::PI * 50.0 * t).sin()).unwrap();
/// let coeffs = FilterSpec::lowpass(500.0, 4, 8000).design().unwrap();
/// let filtered = filtfilt(&signal, &coeffs).unwrap();
/// assert_eq!(filtered.len(), signal.len());
/// ```
pub fn filtfilt(signal: &Signal, coeffs: &FilterCoefficients) -> Result<Signal> {
    let x = signal.samples();
    let pad = pad_len(coeffs);
    if x.len() <= pad {
        return Err(Error::SignalTooShort {
            len: x.len(),
            required: pad,
        });
    }

    let mut buffer = odd_extend(x, pad);
    let zi = steady_state(coeffs);
    let mut filter = IirFilter::new(coeffs);

    filter.prime(&zi, buffer[0]);
    filter.process_in_place(&mut buffer);

    buffer.reverse();
    filter.prime(&zi, buffer[0]);
    filter.process_in_place(&mut buffer);
    buffer.reverse();

    #[cfg(feature = "tracing")]
    tracing::debug!(len = x.len(), pad, taps = coeffs.len(), "filtfilt");

    let trimmed = buffer[pad..pad + x.len()].to_vec();
    if let Some(index) = trimmed.iter().position(|y| !y.is_finite()) {
        return Err(Error::NonFiniteSample { index });
    }
    Ok(signal.with_samples(trimmed))
}

/// Extends `x` by `pad` samples at each end, reflecting through the end
/// points: `2·x[0] - x[pad..=1]` on the left, `2·x[n-1] - x[n-2..=n-1-pad]`
/// on the right.
fn odd_extend(x: &[f64], pad: usize) -> Vec<f64> {
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];

    let mut out = Vec::with_capacity(n + 2 * pad);
    out.extend((1..=pad).rev().map(|i| 2.0 * first - x[i]));
    out.extend_from_slice(x);
    out.extend((1..=pad).map(|i| 2.0 * last - x[n - 1 - i]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterSpec;
    use core::f64::consts::PI;

    fn sine(freq: f64, sample_rate: u32, len: usize) -> Signal {
        Signal::from_fn(sample_rate, len, |t| (2.0 * PI * freq * t).sin()).unwrap()
    }

    #[test]
    fn odd_extension_reflects_through_end_points() {
        let x = [1.0, 2.0, 4.0, 7.0];
        let ext = odd_extend(&x, 2);
        // left: 2·1 - x[2], 2·1 - x[1]; right: 2·7 - x[2], 2·7 - x[1]
        assert_eq!(ext, vec![-2.0, 0.0, 1.0, 2.0, 4.0, 7.0, 10.0, 12.0]);
    }

    #[test]
    fn identity_filter_twice_returns_input() {
        let signal = Signal::new(vec![0.3, -1.0, 0.25, 0.8, -0.6, 0.1], 1000).unwrap();
        let identity = FilterCoefficients::identity();
        let once = filtfilt(&signal, &identity).unwrap();
        let twice = filtfilt(&once, &identity).unwrap();
        assert_eq!(twice, signal);
    }

    #[test]
    fn too_short_signal_is_rejected() {
        let coeffs = FilterSpec::lowpass(1000.0, 6, 44100).design().unwrap();
        let signal = Signal::new(vec![0.0; 21], 44100).unwrap();
        let err = filtfilt(&signal, &coeffs).unwrap_err();
        assert_eq!(
            err,
            Error::SignalTooShort {
                len: 21,
                required: 21
            }
        );
    }

    #[test]
    fn output_keeps_length_and_rate() {
        let signal = sine(100.0, 8000, 1000);
        let coeffs = FilterSpec::highpass(50.0, 4, 8000).design().unwrap();
        let out = filtfilt(&signal, &coeffs).unwrap();
        assert_eq!(out.len(), signal.len());
        assert_eq!(out.sample_rate(), 8000);
    }

    #[test]
    fn passband_tone_has_no_phase_shift() {
        let fs = 44100;
        let signal = sine(200.0, fs, 44100);
        let coeffs = FilterSpec::lowpass(2000.0, 6, fs).design().unwrap();
        let out = filtfilt(&signal, &coeffs).unwrap();

        // Away from the edges the output tracks the input sample for sample.
        for (i, (&x, &y)) in signal
            .samples()
            .iter()
            .zip(out.samples())
            .enumerate()
            .skip(2000)
            .take(40000)
        {
            assert!((x - y).abs() < 1e-3, "sample {i}: {x} vs {y}");
        }
    }

    #[test]
    fn stopband_tone_is_removed() {
        let fs = 44100;
        let signal = sine(8000.0, fs, 44100);
        let coeffs = FilterSpec::lowpass(1000.0, 6, fs).design().unwrap();
        let out = filtfilt(&signal, &coeffs).unwrap();
        let peak = out.samples()[2000..42000]
            .iter()
            .fold(0.0f64, |m, x| m.max(x.abs()));
        assert!(peak < 1e-4, "residual peak {peak}");
    }

    #[test]
    fn constant_signal_passes_lowpass_unchanged() {
        let signal = Signal::new(vec![0.5; 500], 8000).unwrap();
        let coeffs = FilterSpec::lowpass(1000.0, 4, 8000).design().unwrap();
        let out = filtfilt(&signal, &coeffs).unwrap();
        for &y in out.samples() {
            assert!((y - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn diverging_recursion_is_an_error() {
        // Pole at z = 1.5.
        let unstable = FilterCoefficients::new(vec![1.0], vec![1.0, -1.5]);
        let signal = sine(100.0, 8000, 4000);
        let err = filtfilt(&signal, &unstable).unwrap_err();
        assert!(matches!(err, Error::NonFiniteSample { .. }), "{err:?}");
    }

    #[test]
    fn nan_input_is_reported_at_its_index() {
        let signal = Signal::new(vec![0.0, f64::NAN, 0.5, -0.5, 0.25, 0.0], 1000).unwrap();
        let err = filtfilt(&signal, &FilterCoefficients::identity()).unwrap_err();
        assert_eq!(err, Error::NonFiniteSample { index: 1 });
    }
}
