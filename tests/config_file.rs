//! Integration tests for loading and saving the TOML config file

use mate::config::{load_config_from, save_config_to, Config, WireKind};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_partial_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        [search]
        timeout_ms = 2500

        [search.soundcloud]
        client_id = "abc123"

        [search.internet_archive]
        enabled = false

        [[chat.providers]]
        name = "local"
        endpoint = "http://127.0.0.1:9000/v1/chat/completions"
        timeout_ms = 5000
        wire = "openai"
        model = "llama3"
        "#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.search.timeout_ms, 2_500);
    assert_eq!(config.search.soundcloud.client_id.as_deref(), Some("abc123"));
    assert!(!config.search.internet_archive.enabled);
    assert!(config.search.mixcloud.enabled);
    assert_eq!(config.chat.providers.len(), 1);
    assert_eq!(config.chat.providers[0].wire, WireKind::OpenAi);
    assert_eq!(config.chat.providers[0].model.as_deref(), Some("llama3"));
    assert_eq!(config.lyrics.timeout_ms, 10_000);
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.search.youtube.api_key = Some("key".to_string());
    config.debug = true;
    save_config_to(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert!(loaded.debug);
    assert_eq!(loaded.search.youtube.api_key.as_deref(), Some("key"));
    assert_eq!(loaded.chat.providers.len(), 3);
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[lyrics]\ntimeout_ms = 0\n").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("lyrics.timeout_ms"));
}

#[test]
fn test_unparsable_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "search = [not toml").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
