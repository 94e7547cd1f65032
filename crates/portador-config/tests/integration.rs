//! Integration tests for portador-config: file round trips and profile
//! overrides.

use portador_config::{ConfigError, PipelineParams, ValidationError, get_profile};
use tempfile::TempDir;

#[test]
fn test_params_save_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("receiver.toml");

    let original = PipelineParams::default()
        .with_bandwidth(1500.0)
        .with_lowpass_cutoff(1200.0)
        .with_highpass_order(2);
    original.save(&path).unwrap();

    let loaded = PipelineParams::load(&path).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("params.toml");

    PipelineParams::default().save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let err = PipelineParams::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("partial.toml");
    std::fs::write(&path, "highpass_cutoff_hz = 120.0\nlowpass_order = 8\n").unwrap();

    let params = PipelineParams::load(&path).unwrap();
    assert_eq!(params.highpass_cutoff_hz, 120.0);
    assert_eq!(params.lowpass_order, 8);
    assert_eq!(params.bandwidth_hz, 1200.0);
    assert_eq!(params.bandpass_order, 6);
}

#[test]
fn test_profile_override_then_validate() {
    let params = get_profile("narrowband")
        .unwrap()
        .with_highpass_cutoff(600.0);

    let err: ConfigError = params.validate().unwrap_err().into();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::EmptyPassband { .. })
    ));
    assert!(err.to_string().starts_with("validation failed: highpass_cutoff_hz"));
}
