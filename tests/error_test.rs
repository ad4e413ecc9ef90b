//! Tests for error types

use std::path::PathBuf;

use ml_logwriter::Error;

#[test]
fn test_directory_exists_error() {
    let error = Error::DirectoryExists(PathBuf::from("/runs/baseline"));
    let error_str = format!("{error}");
    assert!(error_str.contains("Directory already exists"));
    assert!(error_str.contains("/runs/baseline"));
}

#[test]
fn test_already_logged_error() {
    let error = Error::AlreadyLogged {
        path: PathBuf::from("/runs/r/parameters/lr"),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Artifact already logged"));
    assert!(error_str.contains("Refusing to overwrite"));
}

#[test]
fn test_validation_error() {
    let error = Error::Validation("x and y must have the same length".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Validation failed"));
    assert!(error.is_recoverable());
}

#[test]
fn test_invalid_name_error() {
    let error = Error::InvalidName("../up".to_string());
    assert_eq!(format!("{error}"), "Invalid name: \"../up\"");
}

#[test]
fn test_no_active_run_error() {
    let error_str = format!("{}", Error::NoActiveRun);
    assert!(error_str.contains("create()"));
}

#[test]
fn test_serialization_error_conversion() {
    let json_error = serde_json::from_str::<u8>("nope").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("Serialization error"));
    assert!(!error.is_recoverable());
}

#[test]
fn test_logger_installed_error() {
    let error_str = format!("{}", Error::LoggerInstalled);
    assert!(error_str.contains("already installed"));
}

#[test]
fn test_error_debug() {
    let error = Error::NoActiveRun;
    assert!(format!("{error:?}").contains("NoActiveRun"));
}

#[test]
fn test_invalid_config_error() {
    let error = Error::InvalidConfig("log level \"verbose\"".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid logger configuration"));
    assert!(error_str.contains("verbose"));
    assert!(!error.is_recoverable());
}

#[test]
fn test_plot_error() {
    let error = Error::Plot("font unavailable".to_string());
    assert_eq!(format!("{error}"), "Plot error: font unavailable");
    assert!(!error.is_recoverable());
}
