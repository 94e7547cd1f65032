//! Audio file I/O for portador.
//!
//! This crate provides:
//!
//! - **Loading**: [`read_signal`] decodes a WAV file into a mono
//!   [`Signal`](portador_core::Signal) with amplitudes in [-1, 1]
//! - **Saving**: [`write_signal`] encodes a signal as 16-bit or 24-bit PCM,
//!   or 32-bit float, at the signal's own sample rate
//! - **Inspection**: [`read_wav_info`] reads header metadata only
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use portador_io::{BitDepth, read_signal, write_signal};
//!
//! let signal = read_signal("capture.wav")?;
//! // ... demodulate ...
//! write_signal("recovered.wav", &audio, BitDepth::Pcm16)?;
//! ```

mod wav;

pub use wav::{BitDepth, WavFormat, WavInfo, read_signal, read_wav_info, write_signal};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Decoded samples do not form a valid signal (e.g. no frames).
    #[error("invalid signal in WAV file: {0}")]
    Signal(#[from] portador_core::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
