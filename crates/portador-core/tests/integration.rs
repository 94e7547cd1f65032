//! Integration tests for portador-core DSP stages.
//!
//! Verifies filter design against signal-level measurements: sine waves pushed
//! through zero-phase filters, band edges of designed responses, and the
//! bandpass → mix → condition chain on a suppressed-carrier AM tone.

use portador_core::{
    BasebandConditioner, Error, FilterCoefficients, FilterSpec, Signal, demodulate, filtfilt,
    linear_to_db, mean, peak, rms,
};

const SAMPLE_RATE: u32 = 44100;
const TAU: f64 = core::f64::consts::TAU;

/// Generate a sine wave signal at the given frequency.
fn generate_sine(freq_hz: f64, num_samples: usize) -> Signal {
    Signal::from_fn(SAMPLE_RATE, num_samples, |t| (TAU * freq_hz * t).sin()).unwrap()
}

/// Pearson correlation of two equal-length slices.
fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let mx = mean(x);
    let my = mean(y);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx) * (a - mx);
        syy += (b - my) * (b - my);
    }
    sxy / (sxx * syy).sqrt()
}

/// Gain in dB of a zero-phase filter at `freq_hz`, measured away from the edges.
fn measure_filtfilt_response(coeffs: &FilterCoefficients, freq_hz: f64) -> f64 {
    let input = generate_sine(freq_hz, 44100);
    let output = filtfilt(&input, coeffs).unwrap();
    let settled = 4410..39690;
    linear_to_db(rms(&output.samples()[settled.clone()]) / rms(&input.samples()[settled]))
}

// ============================================================================
// 1. Designed responses
// ============================================================================

#[test]
fn lowpass_is_three_db_down_at_cutoff() {
    let coeffs = FilterSpec::lowpass(1000.0, 6, SAMPLE_RATE).design().unwrap();
    let fs = f64::from(SAMPLE_RATE);
    assert!((coeffs.magnitude_at(0.0, fs) - 1.0).abs() < 1e-9);
    assert!((coeffs.magnitude_at(1000.0, fs) - core::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);
}

#[test]
fn bandpass_edges_and_stopband() {
    let coeffs = FilterSpec::bandpass(400.0, 1600.0, 6, SAMPLE_RATE)
        .design()
        .unwrap();
    let fs = f64::from(SAMPLE_RATE);
    let half_power = core::f64::consts::FRAC_1_SQRT_2;

    assert!((coeffs.magnitude_at(400.0, fs) - half_power).abs() < 1e-6);
    assert!((coeffs.magnitude_at(1600.0, fs) - half_power).abs() < 1e-6);
    assert!(coeffs.magnitude_at(1000.0, fs) > 0.999);
    assert!(coeffs.magnitude_at(100.0, fs) < 1e-3);
    assert!(coeffs.magnitude_at(8000.0, fs) < 1e-3);
}

#[test]
fn highpass_passes_nyquist() {
    let coeffs = FilterSpec::highpass(250.0, 4, SAMPLE_RATE).design().unwrap();
    let fs = f64::from(SAMPLE_RATE);
    assert!((coeffs.magnitude_at(fs / 2.0, fs) - 1.0).abs() < 1e-9);
    assert!(coeffs.magnitude_at(0.0, fs) < 1e-9);
}

// ============================================================================
// 2. Zero-phase filtering
// ============================================================================

#[test]
fn filtfilt_squares_the_magnitude_at_cutoff() {
    let coeffs = FilterSpec::lowpass(1000.0, 6, SAMPLE_RATE).design().unwrap();
    let gain_db = measure_filtfilt_response(&coeffs, 1000.0);
    assert!(
        (gain_db + 6.0206).abs() < 0.1,
        "expected -6.02 dB at cutoff, got {gain_db:.3} dB"
    );
}

#[test]
fn filtfilt_passband_is_flat() {
    let coeffs = FilterSpec::bandpass(400.0, 1600.0, 6, SAMPLE_RATE)
        .design()
        .unwrap();
    let gain_db = measure_filtfilt_response(&coeffs, 900.0);
    assert!(gain_db.abs() < 0.05, "passband gain {gain_db:.3} dB");
}

#[test]
fn design_rejects_cutoff_at_nyquist() {
    let err = FilterSpec::lowpass(22050.0, 6, SAMPLE_RATE)
        .design()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCutoff { kind: "lowpass", .. }));
}

#[test]
fn design_rejects_inverted_band() {
    let err = FilterSpec::bandpass(1600.0, 400.0, 6, SAMPLE_RATE)
        .design()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCutoff { kind: "bandpass", .. }));
}

// ============================================================================
// 3. Bandpass → mix → condition
// ============================================================================

#[test]
fn suppressed_carrier_tone_is_recovered() {
    let carrier = 1000.0;
    let am = Signal::from_fn(SAMPLE_RATE, 44100, |t| {
        (TAU * 440.0 * t).cos() * (TAU * carrier * t).cos()
    })
    .unwrap();

    let band = FilterSpec::bandpass(carrier - 600.0, carrier + 600.0, 6, SAMPLE_RATE)
        .design()
        .unwrap();
    let isolated = filtfilt(&am, &band).unwrap();
    let mixed = demodulate(&isolated, carrier);
    let audio = BasebandConditioner::new(1000.0, 6, 250.0, 4)
        .condition(&mixed)
        .unwrap();

    assert_eq!(audio.len(), am.len());
    assert!((peak(audio.samples()) - 1.0).abs() < 1e-12);
    assert!(mean(audio.samples()).abs() < 1e-9);

    let reference: Vec<f64> = audio.times().map(|t| (TAU * 440.0 * t).cos()).collect();
    let steady = 2000..42100;
    let r = correlation(&audio.samples()[steady.clone()], &reference[steady]);
    assert!(r > 0.9, "correlation {r:.4}");
}

#[test]
fn short_signal_fails_in_bandpass() {
    let band = FilterSpec::bandpass(400.0, 1600.0, 6, SAMPLE_RATE)
        .design()
        .unwrap();
    let short = generate_sine(1000.0, 39);
    assert_eq!(
        filtfilt(&short, &band),
        Err(Error::SignalTooShort {
            len: 39,
            required: 39
        })
    );
}
