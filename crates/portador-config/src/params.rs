//! Receiver parameter file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::{ValidationResult, validate_params};

/// Default passband width around the estimated carrier, in Hz.
pub const DEFAULT_BANDWIDTH_HZ: f64 = 1200.0;
/// Default message lowpass cutoff, in Hz.
pub const DEFAULT_LOWPASS_CUTOFF_HZ: f64 = 1000.0;
/// Default drift/hum highpass cutoff, in Hz.
pub const DEFAULT_HIGHPASS_CUTOFF_HZ: f64 = 250.0;
/// Default bandpass prototype order.
pub const DEFAULT_BANDPASS_ORDER: usize = 6;
/// Default lowpass order.
pub const DEFAULT_LOWPASS_ORDER: usize = 6;
/// Default highpass order.
pub const DEFAULT_HIGHPASS_ORDER: usize = 4;

/// Tunable parameters of the demodulation pipeline.
///
/// Stored as flat TOML. Missing keys take their default value, unknown keys
/// are rejected:
///
/// ```toml
/// bandwidth_hz = 1200.0
/// lowpass_cutoff_hz = 1000.0
/// highpass_cutoff_hz = 250.0
/// bandpass_order = 6
/// lowpass_order = 6
/// highpass_order = 4
/// ```
///
/// # Example
///
/// ```rust
/// use portador_config::PipelineParams;
///
/// let params = PipelineParams::from_toml("bandwidth_hz = 800.0").unwrap();
/// assert_eq!(params.bandwidth_hz, 800.0);
/// assert_eq!(params.lowpass_order, 6);
/// assert_eq!(params.band_edges(1000.0), (600.0, 1400.0));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineParams {
    /// Passband width around the estimated carrier, in Hz. The bandpass edges
    /// are `carrier ± bandwidth_hz / 2`.
    pub bandwidth_hz: f64,

    /// Cutoff of the lowpass that removes the `2·fc` mixing image, in Hz.
    pub lowpass_cutoff_hz: f64,

    /// Cutoff of the highpass that removes near-DC drift, in Hz.
    pub highpass_cutoff_hz: f64,

    /// Bandpass prototype order (the digital filter has twice as many poles).
    pub bandpass_order: usize,

    /// Lowpass order.
    pub lowpass_order: usize,

    /// Highpass order.
    pub highpass_order: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            bandwidth_hz: DEFAULT_BANDWIDTH_HZ,
            lowpass_cutoff_hz: DEFAULT_LOWPASS_CUTOFF_HZ,
            highpass_cutoff_hz: DEFAULT_HIGHPASS_CUTOFF_HZ,
            bandpass_order: DEFAULT_BANDPASS_ORDER,
            lowpass_order: DEFAULT_LOWPASS_ORDER,
            highpass_order: DEFAULT_HIGHPASS_ORDER,
        }
    }
}

impl PipelineParams {
    /// Set the passband width around the carrier.
    pub fn with_bandwidth(mut self, bandwidth_hz: f64) -> Self {
        self.bandwidth_hz = bandwidth_hz;
        self
    }

    /// Set the lowpass cutoff.
    pub fn with_lowpass_cutoff(mut self, cutoff_hz: f64) -> Self {
        self.lowpass_cutoff_hz = cutoff_hz;
        self
    }

    /// Set the highpass cutoff.
    pub fn with_highpass_cutoff(mut self, cutoff_hz: f64) -> Self {
        self.highpass_cutoff_hz = cutoff_hz;
        self
    }

    /// Set the bandpass order.
    pub fn with_bandpass_order(mut self, order: usize) -> Self {
        self.bandpass_order = order;
        self
    }

    /// Set the lowpass order.
    pub fn with_lowpass_order(mut self, order: usize) -> Self {
        self.lowpass_order = order;
        self
    }

    /// Set the highpass order.
    pub fn with_highpass_order(mut self, order: usize) -> Self {
        self.highpass_order = order;
        self
    }

    /// Bandpass edges `(low, high)` in Hz around `carrier_hz`.
    pub fn band_edges(&self, carrier_hz: f64) -> (f64, f64) {
        let half = self.bandwidth_hz / 2.0;
        (carrier_hz - half, carrier_hz + half)
    }

    /// Checks every field, see [`validate_params`].
    pub fn validate(&self) -> ValidationResult<()> {
        validate_params(self)
    }

    /// Load parameters from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load parameters from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the parameters to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the parameters to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
