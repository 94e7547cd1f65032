//! Portador Analysis - Spectral tools for carrier estimation
//!
//! This crate turns a [`Signal`](portador_core::Signal) into a spectrum and
//! derives the carrier frequency a synchronous receiver mixes with:
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`spectrum`] - One-sided magnitude spectra and top-N peak listing
//! - [`carrier`] - Two-strongest-peaks carrier estimation
//! - [`compare`] - Correlation and error metrics against a reference
//! - [`export`] - CSV export of spectra and signal excerpts
//!
//! ## Example
//!
//! ```rust
//! use portador_analysis::{CarrierEstimator, Spectrum, Window};
//! use portador_core::Signal;
//! use std::f64::consts::PI;
//!
//! let signal = Signal::from_fn(48000, 48000, |t| {
//!     (2.0 * PI * 300.0 * t).cos() * (2.0 * PI * 6000.0 * t).cos()
//! })
//! .unwrap();
//!
//! let estimate = CarrierEstimator::new().estimate(&signal).unwrap();
//! assert_eq!(estimate.frequency_hz, 6000.0);
//!
//! let spectrum = Spectrum::from_signal(&signal, Window::Hann);
//! for peak in spectrum.peak_frequencies(4) {
//!     println!("{:.1} Hz  {:.3}", peak.frequency_hz, peak.magnitude);
//! }
//! ```

pub mod carrier;
pub mod compare;
pub mod export;
pub mod fft;
pub mod spectrum;

pub use carrier::{CarrierEstimate, CarrierEstimator, MIN_SAMPLES, estimate_from_spectrum};
pub use compare::pearson_correlation;
pub use fft::{Fft, Window};
pub use spectrum::{Peak, Spectrum};
