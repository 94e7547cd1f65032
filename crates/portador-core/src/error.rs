//! Error types for the core DSP stages.

use thiserror::Error;

/// Errors raised by signal construction, filter design, filtering and
/// conditioning.
///
/// Every variant carries the offending value so a failed run can be
/// diagnosed from the message alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Not enough samples to form a spectrum with two candidate peaks.
    #[error("insufficient data: {len} samples, spectrum needs at least {required}")]
    InsufficientData {
        /// Number of samples supplied.
        len: usize,
        /// Minimum number of samples required.
        required: usize,
    },

    /// A cutoff frequency is degenerate or outside the open interval (0, Nyquist).
    #[error("invalid {kind} cutoff {cutoff_hz} Hz (Nyquist {nyquist_hz} Hz): {reason}")]
    InvalidCutoff {
        /// Filter kind being designed (`lowpass`, `highpass`, `bandpass`).
        kind: &'static str,
        /// The offending cutoff in Hz.
        cutoff_hz: f64,
        /// Nyquist frequency of the design sample rate.
        nyquist_hz: f64,
        /// What is wrong with the cutoff.
        reason: &'static str,
    },

    /// Filter order below 1.
    #[error("unsupported filter order {order}: must be at least 1")]
    UnsupportedOrder {
        /// The requested order.
        order: usize,
    },

    /// Signal shorter than the edge padding zero-phase filtering needs.
    #[error("signal too short for zero-phase filtering: {len} samples, need more than {required}")]
    SignalTooShort {
        /// Number of samples supplied.
        len: usize,
        /// Padding length the filter requires; the signal must be longer.
        required: usize,
    },

    /// Polynomial expansion lost the designed response to rounding.
    ///
    /// Typical for high orders with a passband that is narrow relative to the
    /// sample rate; lower the order or widen the band.
    #[error("{kind} filter of order {order} is not realizable in transfer-function form: {reason}")]
    UnrealizableFilter {
        /// Filter kind being designed.
        kind: &'static str,
        /// The requested order.
        order: usize,
        /// Which check the expanded coefficients failed.
        reason: &'static str,
    },

    /// NaN or infinity in a sample buffer.
    #[error("non-finite sample at index {index}")]
    NonFiniteSample {
        /// Position of the first offending sample.
        index: usize,
    },

    /// Peak normalization of an all-zero signal.
    #[error("silent signal: peak amplitude is zero, cannot normalize")]
    SilentSignal,

    /// Signal construction invariant violated (empty buffer or zero sample rate).
    #[error("invalid signal: {reason}")]
    InvalidSignal {
        /// Which invariant failed.
        reason: &'static str,
    },
}

/// Convenience result type for core operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_cutoff_display_names_kind_and_value() {
        let err = Error::InvalidCutoff {
            kind: "lowpass",
            cutoff_hz: 30000.0,
            nyquist_hz: 22050.0,
            reason: "must be below Nyquist",
        };
        let msg = err.to_string();
        assert!(msg.contains("lowpass"), "got: {msg}");
        assert!(msg.contains("30000"), "got: {msg}");
        assert!(msg.contains("22050"), "got: {msg}");
    }

    #[test]
    fn signal_too_short_display() {
        let err = Error::SignalTooShort {
            len: 10,
            required: 39,
        };
        assert_eq!(
            err.to_string(),
            "signal too short for zero-phase filtering: 10 samples, need more than 39"
        );
    }

    #[test]
    fn unrealizable_filter_display_names_kind_and_order() {
        let err = Error::UnrealizableFilter {
            kind: "bandpass",
            order: 6,
            reason: "impulse response does not decay",
        };
        assert_eq!(
            err.to_string(),
            "bandpass filter of order 6 is not realizable in transfer-function form: \
             impulse response does not decay"
        );
    }

    #[test]
    fn silent_signal_display() {
        assert_eq!(
            Error::SilentSignal.to_string(),
            "silent signal: peak amplitude is zero, cannot normalize"
        );
    }
}
