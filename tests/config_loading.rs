//! Integration tests for loading generation settings from JSON files.

use delver::{DelverError, GenerationConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(r#"{ "seed": 5, "width": 30, "height": 16, "enemy_count": 3 }"#);
    let config = GenerationConfig::from_json_file(file.path()).unwrap();

    assert_eq!(config.seed, 5);
    assert_eq!((config.width, config.height), (30, 16));
    assert_eq!(config.enemy_count, 3);
    assert_eq!(config.potion_count, 10);
    assert_eq!((config.min_rooms, config.max_rooms), (5, 10));
}

#[test]
fn test_round_trips_through_a_file() {
    let original = GenerationConfig::for_testing(77);
    let file = write_config(&serde_json::to_string_pretty(&original).unwrap());
    assert_eq!(GenerationConfig::from_json_file(file.path()).unwrap(), original);
}

#[test]
fn test_malformed_json_is_a_serde_error() {
    let file = write_config("{ seed: ");
    assert!(matches!(
        GenerationConfig::from_json_file(file.path()),
        Err(DelverError::Serde(_))
    ));
}

#[test]
fn test_unusable_values_are_rejected() {
    let file = write_config(r#"{ "min_room_size": 9, "max_room_size": 4 }"#);
    assert!(matches!(
        GenerationConfig::from_json_file(file.path()),
        Err(DelverError::InvalidConfig(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        GenerationConfig::from_json_file(dir.path().join("absent.json")),
        Err(DelverError::Io(_))
    ));
}
