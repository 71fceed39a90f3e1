/*!
 * Tests for application configuration functionality
 */

use std::time::Duration;
use tolk::app_config::{Config, LogLevel};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "auto");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.endpoint.url, "https://translate.googleapis.com/translate_a/single");
    assert_eq!(config.endpoint.client_id, "gtx");
    assert_eq!(config.endpoint.timeout(), Duration::from_secs(30));
    assert_eq!(config.rate_limit.max_requests, 30);
    assert_eq!(config.rate_limit.window(), Duration::from_secs(60));
    assert_eq!(config.batch.delay(), Duration::from_millis(500));
    assert_eq!(config.memory.max_entries, 500);
    assert!(!config.memory.reuse_translations);
    assert!(config.memory.apply_glossary);
    assert_eq!(config.history_limit, 100);
    assert_eq!(config.recent_languages_limit, 5);
    assert_eq!(config.max_input_chars, 5000);
    assert!(config.storage_path.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = "invalid".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();
    assert!(config.validate().is_ok());

    config.target_language = "auto".to_string();
    assert!(config.validate().is_err());
    config.target_language = "zh-CN".to_string();
    assert!(config.validate().is_ok());

    config.endpoint.url = "not a url".to_string();
    assert!(config.validate().is_err());
    config.endpoint.url = "http://localhost:8080/translate_a/single".to_string();

    config.rate_limit.max_requests = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.target_language, "en");
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{ "target_language": "de", "rate_limit": { "max_requests": 10 } }"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.source_language, "auto");
    assert_eq!(config.target_language, "de");
    assert_eq!(config.rate_limit.max_requests, 10);
    assert_eq!(config.rate_limit.window_secs, 60);
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json").unwrap();
    assert!(Config::load_or_create(&path).is_err());
}

#[test]
fn test_logLevel_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
