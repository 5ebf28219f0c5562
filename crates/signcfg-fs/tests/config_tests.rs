//! Tests for format-agnostic profile loading

use rstest::rstest;
use serde::{Deserialize, Serialize};
use signcfg_fs::{ConfigStore, Error, NormalizedPath};
use tempfile::tempdir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    version: String,
    config_dir_basename: String,
}

fn sample() -> Profile {
    Profile {
        version: "2.0".into(),
        config_dir_basename: "configs".into(),
    }
}

#[rstest]
#[case("profile.toml")]
#[case("profile.json")]
#[case("profile.yaml")]
#[case("profile.yml")]
fn save_then_load_each_format(#[case] file: &str) {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join(file));
    let store = ConfigStore::new();

    store.save(&path, &sample()).unwrap();
    let loaded: Profile = store.load(&path).unwrap();

    assert_eq!(loaded, sample());
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("profile.ini"));
    std::fs::write(path.to_native(), "version = 2").unwrap();

    let result: signcfg_fs::Result<Profile> = ConfigStore::new().load(&path);

    assert!(matches!(result, Err(Error::UnsupportedFormat { extension }) if extension == "ini"));
}

#[test]
fn malformed_toml_reports_format() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("profile.toml"));
    std::fs::write(path.to_native(), "version = [").unwrap();

    let result: signcfg_fs::Result<Profile> = ConfigStore::new().load(&path);

    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}
