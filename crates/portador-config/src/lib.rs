//! Configuration and profiles for the portador receiver.
//!
//! This crate holds the tunable parameters of the demodulation pipeline,
//! their TOML file format, validation, and a small set of named profiles.
//!
//! # Features
//!
//! - **Parameters**: [`PipelineParams`] with defaults and builder setters
//! - **Files**: Load and save parameters as TOML
//! - **Validation**: Field-level checks with errors naming the field
//! - **Profiles**: Built-in `voice` and `narrowband` parameter sets
//!
//! # Example
//!
//! ```rust,no_run
//! use portador_config::{PipelineParams, get_profile};
//!
//! // Load parameters from a file
//! let params = PipelineParams::load("receiver.toml").unwrap();
//! params.validate().unwrap();
//!
//! // Start from a profile and override one value
//! let params = get_profile("narrowband").unwrap().with_lowpass_cutoff(450.0);
//! params.save("narrow.toml").unwrap();
//! ```

mod error;
mod params;

/// Parameter validation.
pub mod validation;

/// Built-in named profiles.
pub mod profiles;

pub use error::ConfigError;
pub use params::{
    DEFAULT_BANDPASS_ORDER, DEFAULT_BANDWIDTH_HZ, DEFAULT_HIGHPASS_CUTOFF_HZ,
    DEFAULT_HIGHPASS_ORDER, DEFAULT_LOWPASS_CUTOFF_HZ, DEFAULT_LOWPASS_ORDER, PipelineParams,
};
pub use profiles::{PROFILE_NAMES, get_profile, is_profile, profile};
pub use validation::{ValidationError, ValidationResult, validate_params};
