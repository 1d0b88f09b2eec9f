// Integration test for console configuration files

use consolelog::config::{ConsoleConfig, MAX_CHANNEL_BUFFER};
use consolelog::{Console, ConsoleError, Level};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("console.toml");

    let toml_content = r#"
        color = true
        ansi_reset = "\u001b[39m"
        timestamp_format = "%Y-%m-%d"
        mini_timestamp = false
        channel_buffer = 32

        [level_colors]
        debug = "green+bold"
        alert = "magenta+underline"
    "#;

    fs::write(&config_path, toml_content).unwrap();

    let config = ConsoleConfig::from_file(&config_path).unwrap();
    assert!(config.color);
    assert_eq!(config.ansi_reset, "\x1b[39m");
    assert_eq!(config.timestamp_format, "%Y-%m-%d");
    assert!(!config.mini_timestamp);
    assert_eq!(config.channel_buffer, 32);
    assert_eq!(config.level_colors[Level::Debug].as_str(), "\x1b[32;1m");
    assert_eq!(config.level_colors[Level::Alert].as_str(), "\x1b[35m\x1b[4m");
    assert_eq!(config.level_colors[Level::Info].as_str(), "\x1b[34m");

    let console = Console::with_config(config.clone()).unwrap();
    assert_eq!(console.config(), config);
}

#[test]
fn test_load_json_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("console.json");

    let json_content = r#"{
        "color": false,
        "mini_timestamp_unit_ms": 1000,
        "level_colors": { "ERROR": "red" }
    }"#;

    fs::write(&config_path, json_content).unwrap();

    let config = ConsoleConfig::from_file(&config_path).unwrap();
    assert!(!config.color);
    assert_eq!(config.mini_timestamp_unit_ms, 1000);
    assert_eq!(config.level_colors[Level::Error].as_str(), "\x1b[31m");
}

#[test]
fn test_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("console.toml");
    fs::write(&config_path, "").unwrap();

    let config = ConsoleConfig::from_file(&config_path).unwrap();
    assert_eq!(config, ConsoleConfig::default());
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("console.yaml");
    fs::write(&config_path, "color: true").unwrap();

    assert!(matches!(
        ConsoleConfig::from_file(&config_path),
        Err(ConsoleError::InvalidConfig(_))
    ));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("missing.toml");

    assert!(matches!(
        ConsoleConfig::from_file(&config_path),
        Err(ConsoleError::ConfigError(_))
    ));
}

#[test]
fn test_invalid_values_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("console.toml");
    fs::write(&config_path, "channel_buffer = 0").unwrap();

    assert!(matches!(
        ConsoleConfig::from_file(&config_path),
        Err(ConsoleError::ConfigValidationError(_))
    ));

    fs::write(&config_path, "timestamp_format = \"%Q\"").unwrap();
    assert!(matches!(
        ConsoleConfig::from_file(&config_path),
        Err(ConsoleError::ConfigValidationError(_))
    ));
}

#[test]
fn test_unknown_color_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("console.toml");
    fs::write(&config_path, "[level_colors]\ninfo = \"ultraviolet\"").unwrap();

    assert!(matches!(
        ConsoleConfig::from_file(&config_path),
        Err(ConsoleError::InvalidConfig(_))
    ));
}

#[test]
fn test_oversized_channel_buffer_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("console.json");
    let json_content = format!("{{ \"channel_buffer\": {} }}", MAX_CHANNEL_BUFFER + 1);
    fs::write(&config_path, json_content).unwrap();

    assert!(matches!(
        ConsoleConfig::from_file(&config_path),
        Err(ConsoleError::ConfigValidationError(_))
    ));

    let config = ConsoleConfig {
        channel_buffer: usize::MAX,
        ..ConsoleConfig::default()
    };
    assert!(Console::with_config(config).is_err());
}
