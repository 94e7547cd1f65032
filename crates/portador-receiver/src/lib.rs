//! Portador Receiver - synchronous AM demodulation pipeline
//!
//! Chains the stages of `portador-core` and `portador-analysis` into a single
//! batch receiver:
//!
//! - [`Pipeline`] - Runs every stage over a whole [`Signal`](portador_core::Signal)
//! - [`Recovery`] - Normalized baseband audio plus the carrier estimate used
//! - [`Stage`] / [`PipelineError`] - Which step failed, and why
//! - [`StageObserver`] - Read-only hook for intermediate signals and the input spectrum
//!
//! # Limitations
//!
//! The receiver estimates the carrier frequency only. The local reference
//! always starts at zero phase, so a carrier phase offset Δφ scales the
//! recovered audio by `cos(Δφ)` before normalization, and a quadrature carrier
//! (Δφ = ±π/2) cancels it entirely. The estimate itself averages the two
//! strongest spectral lines and is unreliable when more than two lines compete.
//!
//! That includes full-carrier AM: the analysis window leaks the carrier into
//! its neighbouring bin, which outranks the sidebands, so the estimate lands
//! half a bin off the carrier (`fs / 2N` Hz for an `N`-sample input). The
//! offset survives demodulation as a beat at that frequency; over a 1 s input
//! the recovered tone changes sign halfway through. When the message line is
//! stronger than the carrier, the estimate sits next to the message frequency
//! instead and the bandpass usually fails its cutoff check.

pub mod pipeline;

pub use pipeline::{
    NoopObserver, Pipeline, PipelineError, Recovery, Result, Stage, StageObserver,
};
