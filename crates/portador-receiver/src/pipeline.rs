//! The demodulation pipeline: one batch pass from raw samples to normalized
//! baseband audio.
//!
//! ```text
//! input ─► carrier estimate ─► bandpass(fc ± bw/2) ─► mix with cos(2π·fc·t)
//!       ─► lowpass ─► highpass ─► DC removal + peak normalization ─► audio
//! ```
//!
//! Every stage is a pure function of its input signal and the parameters.
//! The first failing stage aborts the run; its error is returned tagged with
//! the [`Stage`].

use core::fmt;

use portador_analysis::{CarrierEstimate, CarrierEstimator, Spectrum, Window};
use portador_config::PipelineParams;
use portador_core::{BasebandConditioner, FilterSpec, Signal, demodulate, filtfilt};
use thiserror::Error;

/// A step of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Two-peak spectral carrier estimate.
    CarrierEstimation,
    /// Zero-phase bandpass around the estimated carrier.
    Bandpass,
    /// Synchronous mix down to baseband.
    Demodulation,
    /// Zero-phase lowpass removing the `2·fc` image.
    Lowpass,
    /// Zero-phase highpass removing near-DC drift.
    Highpass,
    /// DC removal and peak normalization.
    Conditioning,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 6] = [
        Stage::CarrierEstimation,
        Stage::Bandpass,
        Stage::Demodulation,
        Stage::Lowpass,
        Stage::Highpass,
        Stage::Conditioning,
    ];

    /// Snake-case name, used in logs and dump file names.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::CarrierEstimation => "carrier_estimation",
            Stage::Bandpass => "bandpass",
            Stage::Demodulation => "demodulation",
            Stage::Lowpass => "lowpass",
            Stage::Highpass => "highpass",
            Stage::Conditioning => "conditioning",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pipeline run failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A stage rejected its input or parameters.
    #[error("{stage} stage failed: {source}")]
    Stage {
        /// Stage that failed.
        stage: Stage,
        /// The underlying DSP error, carrying the offending value.
        #[source]
        source: portador_core::Error,
    },
}

impl PipelineError {
    /// Stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Stage { stage, .. } => *stage,
        }
    }

    /// The underlying DSP error.
    pub fn dsp_error(&self) -> &portador_core::Error {
        match self {
            PipelineError::Stage { source, .. } => source,
        }
    }
}

/// Result type for pipeline runs.
pub type Result<T> = core::result::Result<T, PipelineError>;

trait StageContext<T> {
    fn at(self, stage: Stage) -> Result<T>;
}

impl<T> StageContext<T> for portador_core::Result<T> {
    fn at(self, stage: Stage) -> Result<T> {
        self.map_err(|source| PipelineError::Stage { stage, source })
    }
}

/// Side channel for intermediate results.
///
/// Observers see every intermediate signal but cannot change it; a run
/// produces the same output with or without one.
pub trait StageObserver {
    /// Called once with the input spectrum and the estimate taken from it.
    fn on_spectrum(&mut self, _spectrum: &Spectrum, _estimate: &CarrierEstimate) {}

    /// Called after each signal-producing stage with its output.
    fn on_stage(&mut self, _stage: Stage, _signal: &Signal) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {}

/// Output of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    /// Normalized baseband audio: zero mean, `max |x| == 1`.
    pub audio: Signal,
    /// Carrier estimate the run demodulated with.
    pub carrier: CarrierEstimate,
}

/// Synchronous AM receiver.
///
/// Holds only parameters; [`run`](Self::run) takes `&self` and keeps no
/// state between calls, so one pipeline can serve concurrent runs.
///
/// # Example
///
/// ```rust
/// use portador_config::PipelineParams;
/// use portador_core::Signal;
/// use portador_receiver::Pipeline;
/// use std::f64::consts::PI;
///
/// let am = Signal::from_fn(44100, 44100, |t| {
///     (2.0 * PI * 440.0 * t).cos() * (2.0 * PI * 1000.0 * t).cos()
/// })
/// .unwrap();
///
/// let recovery = Pipeline::new(PipelineParams::default()).run(&am).unwrap();
/// assert_eq!(recovery.carrier.frequency_hz, 1000.0);
/// assert_eq!(recovery.audio.len(), am.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    params: PipelineParams,
    estimator: CarrierEstimator,
}

impl Pipeline {
    /// Creates a pipeline. Parameters are checked stage by stage at run time
    /// against the input sample rate.
    pub fn new(params: PipelineParams) -> Self {
        Self {
            params,
            estimator: CarrierEstimator::new(),
        }
    }

    /// Uses `window` for the carrier-estimation spectrum instead of Hann.
    pub fn with_window(mut self, window: Window) -> Self {
        self.estimator = self.estimator.with_window(window);
        self
    }

    /// Pipeline parameters.
    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    fn conditioner(&self) -> BasebandConditioner {
        BasebandConditioner::new(
            self.params.lowpass_cutoff_hz,
            self.params.lowpass_order,
            self.params.highpass_cutoff_hz,
            self.params.highpass_order,
        )
    }

    /// Demodulates `input`.
    pub fn run(&self, input: &Signal) -> Result<Recovery> {
        self.run_with(input, &mut NoopObserver)
    }

    /// Demodulates `input`, reporting intermediate results to `observer`.
    pub fn run_with(&self, input: &Signal, observer: &mut dyn StageObserver) -> Result<Recovery> {
        let _span = tracing::info_span!(
            "demodulate",
            samples = input.len(),
            sample_rate = input.sample_rate()
        )
        .entered();

        let (spectrum, carrier) = self
            .estimator
            .estimate_with_spectrum(input)
            .at(Stage::CarrierEstimation)?;
        observer.on_spectrum(&spectrum, &carrier);
        drop(spectrum);

        let fs = input.sample_rate();
        let (low, high) = self.params.band_edges(carrier.frequency_hz);
        tracing::debug!(low_hz = low, high_hz = high, "bandpass edges");
        let band = FilterSpec::bandpass(low, high, self.params.bandpass_order, fs)
            .design()
            .at(Stage::Bandpass)?;
        let isolated = filtfilt(input, &band).at(Stage::Bandpass)?;
        observer.on_stage(Stage::Bandpass, &isolated);

        let mixed = demodulate(&isolated, carrier.frequency_hz);
        drop(isolated);
        observer.on_stage(Stage::Demodulation, &mixed);

        let conditioner = self.conditioner();
        let lowpassed = conditioner.lowpass(&mixed).at(Stage::Lowpass)?;
        drop(mixed);
        observer.on_stage(Stage::Lowpass, &lowpassed);

        let highpassed = conditioner.highpass(&lowpassed).at(Stage::Highpass)?;
        drop(lowpassed);
        observer.on_stage(Stage::Highpass, &highpassed);

        let audio = conditioner.finish(&highpassed).at(Stage::Conditioning)?;
        observer.on_stage(Stage::Conditioning, &audio);

        tracing::info!(carrier_hz = carrier.frequency_hz, "demodulation complete");

        Ok(Recovery { audio, carrier })
    }
}
