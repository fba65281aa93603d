//! Integration tests for bootstrap config loading and credential resolution
//!
//! Tests that manipulate API_KEY / GEMINI_API_KEY / AOCC_CONFIG are marked
//! with #[serial] so they never race on the process environment.

use aocc_common::config::{load_or_default, load_toml_config, resolve_config_path, GeneratorConfig};
use aocc_common::credentials::resolve_api_key;
use aocc_common::{ApiKeyPolicy, CredentialError, Error};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

const ENV_KEY: &str = "AIzaSyENV_0123456789abcdefghijklmnop";
const TOML_KEY: &str = "AIzaSyTOML_0123456789abcdefghijklmno";

fn clear_key_env() {
    std::env::remove_var("API_KEY");
    std::env::remove_var("GEMINI_API_KEY");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
        [server]
        host = "0.0.0.0"
        port = 6000

        [logging]
        level = "debug"

        [generator]
        api_key = "AIzaSyTOML_0123456789abcdefghijklmno"
        model = "test-model"
        timeout_secs = 10
        "#,
    );

    let config = load_toml_config(file.path()).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 6000);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.generator.model, "test-model");
    assert_eq!(config.generator.timeout_secs, 10);
    assert_eq!(config.generator.api_key.as_deref(), Some(TOML_KEY));
}

#[test]
fn test_malformed_config_is_error() {
    let file = write_config("[server\nport = ");
    let result = load_toml_config(file.path());
    assert!(matches!(result, Err(Error::TomlParse(_))));
}

#[test]
fn test_zero_rate_limit_rejected() {
    let file = write_config("[generator]\nrequests_per_minute = 0\n");
    let result = load_toml_config(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let result = load_or_default(Some(std::path::Path::new("/nonexistent/aocc/none.toml")));
    match result {
        Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected an I/O error, got {:?}", other.map(|_| ())),
    }
}

#[test]
#[serial]
fn test_env_config_path_used_when_no_cli_arg() {
    std::env::set_var("AOCC_TEST_CONFIG", "/etc/aocc/from-env.toml");
    let path = resolve_config_path(None, "AOCC_TEST_CONFIG");
    std::env::remove_var("AOCC_TEST_CONFIG");

    assert_eq!(path, Some(std::path::PathBuf::from("/etc/aocc/from-env.toml")));
}

#[test]
#[serial]
fn test_env_key_overrides_toml() {
    clear_key_env();
    std::env::set_var("GEMINI_API_KEY", ENV_KEY);

    let generator = GeneratorConfig {
        api_key: Some(TOML_KEY.to_string()),
        ..GeneratorConfig::default()
    };
    let result = resolve_api_key(&generator, &ApiKeyPolicy::default());
    clear_key_env();

    assert_eq!(result.unwrap(), ENV_KEY);
}

#[test]
#[serial]
fn test_api_key_var_has_highest_priority() {
    clear_key_env();
    std::env::set_var("API_KEY", TOML_KEY);
    std::env::set_var("GEMINI_API_KEY", ENV_KEY);

    let result = resolve_api_key(&GeneratorConfig::default(), &ApiKeyPolicy::default());
    clear_key_env();

    assert_eq!(result.unwrap(), TOML_KEY);
}

#[test]
#[serial]
fn test_toml_fallback_when_env_empty() {
    clear_key_env();

    let generator = GeneratorConfig {
        api_key: Some(format!("  {}  ", TOML_KEY)),
        ..GeneratorConfig::default()
    };
    let result = resolve_api_key(&generator, &ApiKeyPolicy::default());

    assert_eq!(result.unwrap(), TOML_KEY);
}

#[test]
#[serial]
fn test_no_key_anywhere_is_missing() {
    clear_key_env();
    let result = resolve_api_key(&GeneratorConfig::default(), &ApiKeyPolicy::default());
    assert_eq!(result, Err(CredentialError::Missing));
}
