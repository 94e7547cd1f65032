//! Shared CLI helpers used across multiple commands.

use clap::Args;
use portador_analysis::Window;
use portador_config::{PipelineParams, profile};
use std::path::PathBuf;

/// Receiver parameter sources, applied in order: profile or file, then flags.
#[derive(Args, Debug, Default)]
pub struct ParamArgs {
    /// Parameter file (TOML)
    #[arg(short, long, value_name = "FILE", conflicts_with = "profile")]
    pub config: Option<PathBuf>,

    /// Built-in profile (voice, narrowband)
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Bandpass width around the carrier, Hz
    #[arg(long, value_name = "HZ")]
    pub bandwidth: Option<f64>,

    /// Baseband lowpass cutoff, Hz
    #[arg(long, value_name = "HZ")]
    pub lowpass: Option<f64>,

    /// Baseband highpass cutoff, Hz
    #[arg(long, value_name = "HZ")]
    pub highpass: Option<f64>,

    /// Bandpass design order
    #[arg(long, value_name = "N")]
    pub bandpass_order: Option<usize>,

    /// Lowpass design order
    #[arg(long, value_name = "N")]
    pub lowpass_order: Option<usize>,

    /// Highpass design order
    #[arg(long, value_name = "N")]
    pub highpass_order: Option<usize>,
}

impl ParamArgs {
    /// Resolves and validates the effective parameters.
    pub fn resolve(&self) -> anyhow::Result<PipelineParams> {
        let mut params = if let Some(path) = &self.config {
            PipelineParams::load(path)?
        } else if let Some(name) = &self.profile {
            profile(name)?
        } else {
            PipelineParams::default()
        };

        if let Some(hz) = self.bandwidth {
            params = params.with_bandwidth(hz);
        }
        if let Some(hz) = self.lowpass {
            params = params.with_lowpass_cutoff(hz);
        }
        if let Some(hz) = self.highpass {
            params = params.with_highpass_cutoff(hz);
        }
        if let Some(order) = self.bandpass_order {
            params = params.with_bandpass_order(order);
        }
        if let Some(order) = self.lowpass_order {
            params = params.with_lowpass_order(order);
        }
        if let Some(order) = self.highpass_order {
            params = params.with_highpass_order(order);
        }

        params.validate()?;
        tracing::debug!(?params, "resolved receiver parameters");
        Ok(params)
    }
}

/// Parse a window name for clap's `value_parser`.
pub fn parse_window(s: &str) -> Result<Window, String> {
    Window::from_name(s).ok_or_else(|| {
        format!("Unknown window '{s}' (expected rectangular, hann, hamming or blackman)")
    })
}

/// Format a linear level in dB for summaries.
pub fn format_db(linear: f64) -> String {
    format!("{:.1} dB", portador_core::linear_to_db(linear))
}
