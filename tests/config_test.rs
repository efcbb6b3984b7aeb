// tests/config_test.rs
use std::env;
use std::fs;
use std::io::Write;

use gitmoji_release::config::{load_config, Config, CONFIG_FILE_NAME};
use gitmoji_release::domain::VersionBump;
use gitmoji_release::range::RangeMode;
use gitmoji_release::release::{OnTagExists, VersionFloorScope};
use gitmoji_release::GitmojiError;
use serial_test::serial;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[range]
mode = "common-base"
strict_ancestor = true
sorting = "time,reverse"

[release]
bump = "minor"
version_floor_scope = "reachable"
on_tag_exists = "overwrite"
prerelease = true

[classifier]
fallback_to_includes = false

[signature]
name = "release-bot"
email = "bot@example.com"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.range.mode(), RangeMode::CommonBase);
    assert!(config.range.strict_ancestor);
    let sorting = config.range.sorting().unwrap();
    assert!(sorting.time && sorting.reverse && !sorting.topological);
    assert_eq!(config.release.bump().unwrap(), VersionBump::Minor);
    assert_eq!(
        config.release.version_floor_scope().unwrap(),
        VersionFloorScope::Reachable
    );
    assert_eq!(config.release.on_tag_exists().unwrap(), OnTagExists::Overwrite);
    assert!(config.release.prerelease);
    assert!(!config.release.draft);
    assert!(!config.classifier.fallback_to_includes);
    assert_eq!(config.signature.unwrap().name, "release-bot");
}

#[test]
fn test_malformed_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[release\nbump = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, GitmojiError::TomlParse(_)));
}

#[test]
#[serial]
fn test_discovers_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[release]\non_tag_exists = \"skip\"\n",
    )
    .unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let loaded = load_config(None);
    env::set_current_dir(original).unwrap();

    let config = loaded.unwrap();
    assert_eq!(config.release.on_tag_exists().unwrap(), OnTagExists::Skip);
    assert_eq!(config.range, Config::default().range);
}
