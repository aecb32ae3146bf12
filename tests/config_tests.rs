use pyq_predictor::inference::tesseract;
use pyq_predictor::utils::config::AppConfig;
use pyq_predictor::utils::error::ConfigError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_parse_config_from_json() {
    let json = r#"{
        "max_file_size": 52428800,
        "host_url": "127.0.0.1:8080",
        "default_question_count": 8,
        "tesseract_command": "/usr/bin/tesseract",
        "ocr_language": "eng+hin",
        "export_title": "Mock Paper"
    }"#;

    let config: AppConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.max_file_size, 52428800);
    assert_eq!(&*config.host_url, "127.0.0.1:8080");
    assert_eq!(config.default_question_count, 8);
    assert_eq!(&*config.tesseract_command, "/usr/bin/tesseract");
    assert_eq!(&*config.ocr_language, "eng+hin");
    assert_eq!(&*config.export_title, "Mock Paper");
}

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let json = r#"{
        "max_file_size": 1048576,
        "host_url": "0.0.0.0:8000",
        "default_question_count": 3
    }"#;
    temp_file.write_all(json.as_bytes()).unwrap();

    let config = AppConfig::from_file(temp_file.path()).unwrap();

    assert_eq!(config.max_file_size, 1048576);
    assert_eq!(&*config.host_url, "0.0.0.0:8000");
    assert_eq!(config.default_question_count().unwrap().get(), 3);
    // Missing fields fall back to defaults.
    assert_eq!(&*config.tesseract_command, "tesseract");
    assert_eq!(&*config.export_title, "Assumed Paper");
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();

    assert_eq!(config.max_file_size, 50 * 1024 * 1024);
    assert_eq!(&*config.host_url, "0.0.0.0:3000");
    assert_eq!(config.default_question_count, 5);
    assert_eq!(&*config.ocr_language, "eng");
}

#[test]
fn test_default_config_uses_recognizer_defaults() {
    let config = AppConfig::default();

    assert_eq!(&*config.tesseract_command, tesseract::DEFAULT_COMMAND);
    assert_eq!(&*config.ocr_language, tesseract::DEFAULT_LANGUAGE);
}

#[test]
fn test_config_rejects_out_of_range_question_count() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(br#"{ "default_question_count": 11 }"#)
        .unwrap();

    let result = AppConfig::from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_config_rejects_malformed_json() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"{ not json").unwrap();

    let result = AppConfig::from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_missing_config_file() {
    let result = AppConfig::from_file("does/not/exist.json");
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_serialize_config() {
    let config = AppConfig::default();
    let serialized = serde_json::to_string(&config).unwrap();
    let parsed: AppConfig = serde_json::from_str(&serialized).unwrap();

    assert_eq!(config.max_file_size, parsed.max_file_size);
    assert_eq!(config.host_url, parsed.host_url);
    assert_eq!(config.default_question_count, parsed.default_question_count);
    assert_eq!(config.export_title, parsed.export_title);
}
