//! Named parameter profiles bundled with the library.
//!
//! Profiles are embedded TOML and always available without external files.

use crate::error::ConfigError;
use crate::params::PipelineParams;

/// Names of the built-in profiles.
pub static PROFILE_NAMES: &[&str] = &["voice", "narrowband"];

static PROFILES_TOML: &[(&str, &str)] = &[("voice", VOICE), ("narrowband", NARROWBAND)];

/// Speech-band defaults: 1200 Hz around the carrier, 250-1000 Hz message band.
const VOICE: &str = r#"
bandwidth_hz = 1200.0
lowpass_cutoff_hz = 1000.0
highpass_cutoff_hz = 250.0
bandpass_order = 6
lowpass_order = 6
highpass_order = 4
"#;

/// Tighter band for tones and slow keying on crowded spectra.
const NARROWBAND: &str = r#"
bandwidth_hz = 600.0
lowpass_cutoff_hz = 500.0
highpass_cutoff_hz = 150.0
bandpass_order = 6
lowpass_order = 6
highpass_order = 4
"#;

/// Get a built-in profile by name (case-insensitive).
///
/// `None` only for unknown names. An embedded profile that fails to parse is
/// a packaging bug and panics here; [`profile`] returns it as an error.
pub fn get_profile(name: &str) -> Option<PipelineParams> {
    match profile(name) {
        Ok(params) => Some(params),
        Err(ConfigError::ProfileNotFound(_)) => None,
        Err(err) => panic!("built-in profile '{name}' is invalid: {err}"),
    }
}

/// Like [`get_profile`], but an unknown name is an error.
///
/// # Errors
///
/// - [`ConfigError::ProfileNotFound`] if no built-in profile has this name.
/// - [`ConfigError::TomlParse`] if the embedded profile does not parse.
pub fn profile(name: &str) -> Result<PipelineParams, ConfigError> {
    lookup(PROFILES_TOML, name)
}

fn lookup(table: &[(&str, &str)], name: &str) -> Result<PipelineParams, ConfigError> {
    let key = name.to_ascii_lowercase();
    let (_, toml) = table
        .iter()
        .find(|(n, _)| *n == key)
        .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;
    PipelineParams::from_toml(toml)
}

/// Check whether `name` refers to a built-in profile.
pub fn is_profile(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    PROFILE_NAMES.contains(&name.as_str())
}
