//! Synchronous (coherent) demodulation by a locally generated cosine.
//!
//! For a band-limited input `m(t)·cos(2π·fc·t + φ)` and reference
//! `cos(2π·fc·t)`:
//!
//! ```text
//! product = m(t)/2 · [cos(φ) + cos(4π·fc·t + φ)]
//! ```
//!
//! The first term is the message at baseband, the second an image at `2·fc`
//! that a following lowpass removes.
//!
//! ## Phase limitation
//!
//! Only the carrier frequency is known; the reference always starts at zero
//! phase. A phase offset φ between the transmitted carrier and the reference
//! scales the recovered baseband by `cos(φ)`, down to complete cancellation at
//! φ = ±π/2. Nothing downstream corrects this; peak normalization hides the
//! scale but not the loss of SNR.

use crate::signal::Signal;
use core::f64::consts::PI;

/// Reference cosine `cos(2π·freq_hz·i / sample_rate)` for `i` in `0..len`.
pub fn reference_tone(len: usize, sample_rate: u32, freq_hz: f64) -> Vec<f64> {
    let omega = 2.0 * PI * freq_hz / f64::from(sample_rate);
    (0..len).map(|i| (omega * i as f64).cos()).collect()
}

/// Multiplies `signal` sample by sample with a zero-phase cosine at
/// `carrier_hz`.
///
/// # Example
///
/// ```rust
/// use portador_core::{Signal, demodulate};
///
/// let signal = Signal::new(vec![1.0; 4], 4).unwrap();
/// let mixed = demodulate(&signal, 1.0);
/// // cos(2π·i/4) = 1, 0, -1, 0
/// assert!((mixed.samples()[2] + 1.0).abs() < 1e-12);
/// ```
pub fn demodulate(signal: &Signal, carrier_hz: f64) -> Signal {
    let reference = reference_tone(signal.len(), signal.sample_rate(), carrier_hz);
    let mixed = signal
        .samples()
        .iter()
        .zip(&reference)
        .map(|(&x, &r)| x * r)
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(carrier_hz, len = signal.len(), "synchronous mix");

    signal.with_samples(mixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(x: &[f64]) -> f64 {
        x.iter().sum::<f64>() / x.len() as f64
    }

    #[test]
    fn reference_starts_at_zero_phase() {
        let tone = reference_tone(8, 8000, 1000.0);
        assert_eq!(tone[0], 1.0);
        assert!(tone[2].abs() < 1e-12);
        assert!((tone[4] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn output_keeps_length_and_rate() {
        let signal = Signal::new(vec![0.5; 100], 16000).unwrap();
        let out = demodulate(&signal, 1234.0);
        assert_eq!(out.len(), 100);
        assert_eq!(out.sample_rate(), 16000);
    }

    #[test]
    fn in_phase_carrier_mixes_to_half_dc() {
        let fs = 48000;
        let carrier = Signal::new(reference_tone(48000, fs, 1000.0), fs).unwrap();
        let mixed = demodulate(&carrier, 1000.0);
        assert!((mean(mixed.samples()) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn phase_offset_scales_baseband_by_cosine() {
        let fs = 48000;
        let phi = PI / 3.0;
        let carrier = Signal::from_fn(fs, 48000, |t| (2.0 * PI * 1000.0 * t + phi).cos()).unwrap();
        let mixed = demodulate(&carrier, 1000.0);
        assert!((mean(mixed.samples()) - 0.5 * phi.cos()).abs() < 1e-6);
    }

    #[test]
    fn quadrature_carrier_cancels() {
        let fs = 48000;
        let carrier =
            Signal::from_fn(fs, 48000, |t| (2.0 * PI * 1000.0 * t + PI / 2.0).cos()).unwrap();
        let mixed = demodulate(&carrier, 1000.0);
        assert!(mean(mixed.samples()).abs() < 1e-6);
    }
}
