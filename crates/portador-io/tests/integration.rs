//! Integration tests for portador-io WAV loading and saving.

use hound::{SampleFormat, WavSpec, WavWriter};
use portador_core::Signal;
use portador_io::{BitDepth, Error, WavFormat, read_signal, read_wav_info, write_signal};
use tempfile::NamedTempFile;

/// Generate a sine wave signal.
fn sine_wave(sample_rate: u32, freq_hz: f64, num_samples: usize) -> Signal {
    Signal::from_fn(sample_rate, num_samples, |t| {
        0.9 * (2.0 * std::f64::consts::PI * freq_hz * t).sin()
    })
    .unwrap()
}

fn assert_close(a: &Signal, b: &Signal, tolerance: f64) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.samples().iter().zip(b.samples()) {
        assert!(
            (x - y).abs() <= tolerance,
            "sample mismatch: {x} vs {y} (diff={})",
            (x - y).abs()
        );
    }
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn wav_roundtrip_pcm16_44100() {
    let signal = sine_wave(44100, 440.0, 44100);
    let file = NamedTempFile::new().unwrap();
    write_signal(file.path(), &signal, BitDepth::Pcm16).unwrap();

    let loaded = read_signal(file.path()).unwrap();
    assert_eq!(loaded.sample_rate(), 44100);
    // truncation error is below one quantization step
    assert_close(&signal, &loaded, 1.0 / 32767.0);
}

#[test]
fn wav_roundtrip_pcm24_48000() {
    let signal = sine_wave(48000, 1000.0, 4800);
    let file = NamedTempFile::new().unwrap();
    write_signal(file.path(), &signal, BitDepth::Pcm24).unwrap();

    let loaded = read_signal(file.path()).unwrap();
    assert_eq!(loaded.sample_rate(), 48000);
    assert_close(&signal, &loaded, 1.0 / 8_388_607.0);
}

#[test]
fn wav_roundtrip_float32() {
    let signal = sine_wave(22050, 300.0, 2205);
    let file = NamedTempFile::new().unwrap();
    write_signal(file.path(), &signal, BitDepth::Float32).unwrap();

    let loaded = read_signal(file.path()).unwrap();
    assert_close(&signal, &loaded, 1e-7);
}

// ---------------------------------------------------------------------------
// Loading external files
// ---------------------------------------------------------------------------

#[test]
fn stereo_file_is_mixed_to_mono() {
    let file = NamedTempFile::new().unwrap();
    let spec = WavSpec {
        channels: 2,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(file.path(), spec).unwrap();
    for (left, right) in [(32767i16, 0i16), (-32767, -32767), (16000, 16000)] {
        writer.write_sample(left).unwrap();
        writer.write_sample(right).unwrap();
    }
    writer.finalize().unwrap();

    let loaded = read_signal(file.path()).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.samples()[0], 0.5);
    assert_eq!(loaded.samples()[1], -1.0);
    assert!((loaded.samples()[2] - 16000.0 / 32767.0).abs() < 1e-12);
}

#[test]
fn wav_info_reports_header() {
    let signal = sine_wave(16000, 200.0, 8000);
    let file = NamedTempFile::new().unwrap();
    write_signal(file.path(), &signal, BitDepth::Pcm24).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_rate, 16000);
    assert_eq!(info.bits_per_sample, 24);
    assert_eq!(info.num_frames, 8000);
    assert_eq!(info.format, WavFormat::Pcm);
    assert!((info.duration_secs - 0.5).abs() < 1e-12);
}

#[test]
fn missing_file_is_wav_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_signal(dir.path().join("nope.wav")).unwrap_err();
    assert!(matches!(err, Error::Wav(_)));
}

#[test]
fn garbage_file_is_wav_error() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"definitely not RIFF").unwrap();
    assert!(matches!(read_signal(file.path()), Err(Error::Wav(_))));
}
