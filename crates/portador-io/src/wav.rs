//! WAV file reading and writing.
//!
//! Integer PCM is scaled by `2^(bits-1) - 1` in both directions, so a 16-bit
//! sample of 32767 loads as exactly 1.0 and 1.0 writes back as 32767.
//! Writing truncates toward zero after scaling and clamps to the symmetric
//! range `[-(2^(bits-1) - 1), 2^(bits-1) - 1]`.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use portador_core::Signal;
use std::fmt;
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

impl fmt::Display for WavFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavFormat::Pcm => write!(f, "PCM"),
            WavFormat::IeeeFloat => write!(f, "IEEE float"),
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Sample encoding used when writing a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    /// 16-bit integer PCM.
    #[default]
    Pcm16,
    /// 24-bit integer PCM.
    Pcm24,
    /// 32-bit IEEE float.
    Float32,
}

impl BitDepth {
    /// Maps a bit count (16, 24, 32) to an encoding.
    pub fn from_bits(bits: u16) -> Result<Self> {
        match bits {
            16 => Ok(BitDepth::Pcm16),
            24 => Ok(BitDepth::Pcm24),
            32 => Ok(BitDepth::Float32),
            other => Err(Error::UnsupportedFormat(format!(
                "{other}-bit output (expected 16, 24 or 32)"
            ))),
        }
    }

    /// Bits per sample.
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Pcm16 => 16,
            BitDepth::Pcm24 => 24,
            BitDepth::Float32 => 32,
        }
    }

    fn hound_spec(&self, sample_rate: u32) -> hound::WavSpec {
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: self.bits(),
            sample_format: match self {
                BitDepth::Float32 => SampleFormat::Float,
                BitDepth::Pcm16 | BitDepth::Pcm24 => SampleFormat::Int,
            },
        }
    }
}

/// Full-scale integer value for `bits`: `2^(bits-1) - 1`.
fn full_scale(bits: u16) -> f64 {
    2f64.powi(i32::from(bits) - 1) - 1.0
}

/// Read WAV metadata without loading sample data.
///
/// Opens the file, reads the header, and returns a [`WavInfo`] struct
/// with format details and duration. This is much faster than [`read_signal`]
/// for files where you only need metadata.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// Read a WAV file into a mono [`Signal`] with amplitudes in [-1, 1].
///
/// Multi-channel files are mixed down to mono by averaging channels.
///
/// # Errors
///
/// [`Error::Wav`] for unreadable or malformed files, [`Error::Signal`] for a
/// file with no sample frames.
///
/// # Example
/// ```ignore
/// let signal = read_signal("capture.wav")?;
/// println!("Loaded {} samples at {} Hz", signal.len(), signal.sample_rate());
/// ```
pub fn read_signal<P: AsRef<Path>>(path: P) -> Result<Signal> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels);

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = full_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    // Mix down to mono if multi-channel
    let mono = if channels > 1 {
        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect()
    } else {
        samples
    };

    tracing::debug!(
        path = %path.display(),
        frames = mono.len(),
        channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "loaded WAV"
    );

    Ok(Signal::new(mono, spec.sample_rate)?)
}

/// Write a [`Signal`] to a mono WAV file at its own sample rate.
///
/// Samples outside [-1, 1] are clipped for integer encodings; float output
/// is written unchanged.
///
/// # Example
/// ```ignore
/// write_signal("recovered.wav", &audio, BitDepth::Pcm16)?;
/// ```
pub fn write_signal<P: AsRef<Path>>(path: P, signal: &Signal, depth: BitDepth) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WavWriter::create(path, depth.hound_spec(signal.sample_rate()))?;

    match depth {
        BitDepth::Float32 => {
            for &sample in signal.samples() {
                writer.write_sample(sample as f32)?;
            }
        }
        BitDepth::Pcm16 => {
            let max = full_scale(16);
            for &sample in signal.samples() {
                writer.write_sample((sample * max).clamp(-max, max) as i16)?;
            }
        }
        BitDepth::Pcm24 => {
            let max = full_scale(24);
            for &sample in signal.samples() {
                writer.write_sample((sample * max).clamp(-max, max) as i32)?;
            }
        }
    }

    writer.finalize()?;

    tracing::debug!(
        path = %path.display(),
        frames = signal.len(),
        bits = depth.bits(),
        "wrote WAV"
    );
    Ok(())
}
