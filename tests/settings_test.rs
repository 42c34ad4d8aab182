//! Tests for the persistent settings store.

use strictly_cricket::Settings;
use tempfile::TempDir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings, Settings::new());
}

#[test]
fn test_save_and_load_overs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    let mut settings = Settings::new();
    settings.set_overs_per_innings(20).unwrap();
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(*loaded.overs_per_innings(), Some(20));
}

#[test]
fn test_clear_overs_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    let mut settings = Settings::new();
    settings.set_overs_per_innings(5).unwrap();
    settings.save(&path).unwrap();

    settings.clear_overs_per_innings();
    settings.save(&path).unwrap();

    assert_eq!(*Settings::load(&path).unwrap().overs_per_innings(), None);
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "overs_per_innings = \"twenty\"\n").unwrap();

    let err = Settings::load(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse settings"));
}

#[test]
fn test_zero_overs_in_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "overs_per_innings = 0\n").unwrap();

    assert!(Settings::load(&path).is_err());
}
