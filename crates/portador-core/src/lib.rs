//! Portador Core - DSP stages for synchronous AM demodulation
//!
//! This crate provides the signal model and the deterministic DSP stages a
//! receiver chains together once the carrier frequency is known. All samples
//! are `f64`; high-order IIR filters in transfer-function form are not stable
//! enough in single precision.
//!
//! # Signal Model
//!
//! - [`Signal`] - Non-empty real sample buffer with a positive sample rate
//!
//! # Filter Design
//!
//! - [`FilterSpec`] / [`FilterKind`] - What to design: kind, cutoffs, order, sample rate
//! - [`FilterCoefficients`] - Rational transfer function `b / a`
//! - [`butterworth::design`] - Maximally flat magnitude design via zeros/poles/gain
//!
//! # Filtering
//!
//! - [`IirFilter`] - Transposed direct form II filter of arbitrary order
//! - [`filtfilt`] - Zero-phase forward-backward application with edge padding
//!
//! # Demodulation and Conditioning
//!
//! - [`demodulate`] - Multiply by a zero-phase cosine at the carrier frequency
//! - [`BasebandConditioner`] - Lowpass, highpass, DC removal, peak normalization
//!
//! # Example
//!
//! ```rust
//! use portador_core::{BasebandConditioner, FilterSpec, Signal, demodulate, filtfilt};
//! use std::f64::consts::PI;
//!
//! let fs = 44100;
//! let am = Signal::from_fn(fs, fs as usize, |t| {
//!     (2.0 * PI * 440.0 * t).cos() * (2.0 * PI * 1000.0 * t).cos()
//! })
//! .unwrap();
//!
//! let band = FilterSpec::bandpass(400.0, 1600.0, 6, fs).design().unwrap();
//! let isolated = filtfilt(&am, &band).unwrap();
//! let mixed = demodulate(&isolated, 1000.0);
//! let audio = BasebandConditioner::new(1000.0, 6, 250.0, 4)
//!     .condition(&mixed)
//!     .unwrap();
//! assert_eq!(audio.len(), am.len());
//! ```
//!
//! # Logging
//!
//! Enable the `tracing` feature to emit `tracing::debug!` events from filter
//! design and filtering.

pub mod butterworth;
pub mod conditioner;
pub mod error;
pub mod filter;
pub mod filtfilt;
pub mod iir;
pub mod math;
pub mod mixer;
pub mod signal;

pub use conditioner::{BasebandConditioner, normalize_peak, remove_dc};
pub use error::{Error, Result};
pub use filter::{FilterCoefficients, FilterKind, FilterSpec};
pub use filtfilt::{filtfilt, pad_len};
pub use iir::{IirFilter, steady_state};
pub use math::{linear_to_db, mean, peak, rms};
pub use mixer::{demodulate, reference_tone};
pub use signal::Signal;
