//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use veil::config::load_config;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("VEIL_APPLICATION_LOG_LEVEL");
    std::env::remove_var("VEIL_DEID_OFFSET_RANGE_DAYS");
    std::env::remove_var("VEIL_DEID_AUDIT_ENABLED");
    std::env::remove_var("VEIL_LOGGING_LOCAL_PATH");
    std::env::remove_var("TEST_AUDIT_DIR");
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let toml_content = r#"
[application]
log_level = "debug"

[deid]
offset_range_days = 180

[deid.audit]
enabled = true
log_path = "/tmp/veil-test/audit.log"
json_format = false

[logging]
local_enabled = false
local_path = "/tmp/veil"
local_rotation = "size"
local_max_size_mb = 50
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify application config
    assert_eq!(config.application.log_level, "debug");

    // Verify deid config
    assert_eq!(config.deid.offset_range_days, 180);
    assert!(config.deid.audit.enabled);
    assert!(!config.deid.audit.json_format);
    assert_eq!(
        config.deid.audit.log_path.to_string_lossy(),
        "/tmp/veil-test/audit.log"
    );

    // Verify logging config
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/veil");
    assert_eq!(config.logging.local_rotation, "size");
    assert_eq!(config.logging.local_max_size_mb, 50);
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[deid.audit]
enabled = false
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify defaults are applied
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.deid.offset_range_days, 365);
    assert!(config.deid.audit.json_format);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
    assert_eq!(config.logging.local_max_size_mb, 100);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_AUDIT_DIR", "/tmp/veil-audit");

    let toml_content = r#"
[deid.audit]
enabled = false
log_path = "${TEST_AUDIT_DIR}/deid.log"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(
        config.deid.audit.log_path.to_string_lossy(),
        "/tmp/veil-audit/deid.log"
    );

    std::env::remove_var("TEST_AUDIT_DIR");
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("VEIL_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("VEIL_DEID_OFFSET_RANGE_DAYS", "90");
    std::env::set_var("VEIL_DEID_AUDIT_ENABLED", "false");

    let toml_content = r#"
[application]
log_level = "info"

[deid]
offset_range_days = 365
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify env var overrides took effect
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.deid.offset_range_days, 90);
    assert!(!config.deid.audit.enabled);

    cleanup_env_vars();
}

#[test]
fn test_invalid_log_level_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "invalid_level"

[deid.audit]
enabled = false
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_invalid_offset_range_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[deid]
offset_range_days = 0

[deid.audit]
enabled = false
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_missing_config_file() {
    let result = load_config("/nonexistent/veil.toml");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}
