//! Parameter validation.
//!
//! Checks what can be checked without a signal: frequencies finite and
//! positive, orders at least one, and a non-empty message passband. Whether a
//! cutoff lies below Nyquist depends on the input sample rate and is reported
//! by filter design at run time.
//!
//! # Example
//!
//! ```rust
//! use portador_config::{PipelineParams, ValidationError, validate_params};
//!
//! let params = PipelineParams::default().with_lowpass_order(0);
//! assert_eq!(
//!     validate_params(&params),
//!     Err(ValidationError::ZeroOrder { field: "lowpass_order" })
//! );
//! ```

use crate::params::PipelineParams;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Frequency is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the parameter.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Frequency is zero or negative.
    #[error("{field} must be positive, got {value} Hz")]
    NonPositive {
        /// Name of the parameter.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Filter order of zero.
    #[error("{field} must be at least 1")]
    ZeroOrder {
        /// Name of the parameter.
        field: &'static str,
    },

    /// Highpass cutoff at or above the lowpass cutoff leaves no message band.
    #[error("highpass_cutoff_hz ({highpass_hz} Hz) must be below lowpass_cutoff_hz ({lowpass_hz} Hz)")]
    EmptyPassband {
        /// Highpass cutoff in Hz.
        highpass_hz: f64,
        /// Lowpass cutoff in Hz.
        lowpass_hz: f64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_frequency(field: &'static str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(())
}

fn check_order(field: &'static str, order: usize) -> ValidationResult<()> {
    if order == 0 {
        return Err(ValidationError::ZeroOrder { field });
    }
    Ok(())
}

/// Validate every field of `params`, collecting all failures.
///
/// A single failure is returned as-is; several are wrapped in
/// [`ValidationError::Multiple`].
pub fn validate_params(params: &PipelineParams) -> ValidationResult<()> {
    let checks = [
        check_frequency("bandwidth_hz", params.bandwidth_hz),
        check_frequency("lowpass_cutoff_hz", params.lowpass_cutoff_hz),
        check_frequency("highpass_cutoff_hz", params.highpass_cutoff_hz),
        check_order("bandpass_order", params.bandpass_order),
        check_order("lowpass_order", params.lowpass_order),
        check_order("highpass_order", params.highpass_order),
    ];
    let mut errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();

    let cutoffs_valid = params.lowpass_cutoff_hz.is_finite()
        && params.highpass_cutoff_hz.is_finite()
        && params.lowpass_cutoff_hz > 0.0
        && params.highpass_cutoff_hz > 0.0;
    if cutoffs_valid && params.highpass_cutoff_hz >= params.lowpass_cutoff_hz {
        errors.push(ValidationError::EmptyPassband {
            highpass_hz: params.highpass_cutoff_hz,
            lowpass_hz: params.lowpass_cutoff_hz,
        });
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
