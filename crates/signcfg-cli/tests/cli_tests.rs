//! Integration tests for the signcfg binary.
//!
//! These tests exercise the compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use signcfg_test_utils::{ConfigRoot, SampleConfig, SampleImage};
use std::fs;

fn signcfg_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("signcfg"));
    cmd.env_remove("SIGNCFG_PROFILE").env_remove("RUST_LOG");
    cmd
}

fn sample_root() -> ConfigRoot {
    let root = ConfigRoot::new();
    root.write_config("sdm845", "sdm845_secimage.xml", &SampleConfig::new("sdm845").render());
    root.write_config("sdm845", "other_secimage.xml", &SampleConfig::new("msm8998").render());
    root.write_config("sm8150", "sm8150_secimage.xml", &SampleConfig::new("sm8150").render());
    root
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_output() {
    signcfg_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chipset signing configs"));
}

#[test]
fn test_no_command_shows_help_hint() {
    signcfg_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("signcfg --help"));
}

// ============================================================================
// Config root commands
// ============================================================================

#[test]
fn test_chipsets_lists_valid_configs() {
    let root = sample_root();
    signcfg_cmd()
        .arg("chipsets")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("sdm845\nsm8150\n"))
        .stderr(predicate::str::contains("other_secimage.xml"));
}

#[test]
fn test_paths_prints_one_per_chipset() {
    let root = sample_root();
    signcfg_cmd()
        .arg("paths")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("configs/sdm845/sdm845_secimage.xml"))
        .stdout(predicate::str::contains("configs/sm8150/sm8150_secimage.xml"))
        .stdout(predicate::str::contains("other_secimage.xml").not());
}

#[test]
fn test_locate_unknown_chipset_fails() {
    let root = sample_root();
    signcfg_cmd()
        .args(["locate"])
        .arg(root.path())
        .arg("sdm999")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_missing_configs_folder_fails() {
    let root = ConfigRoot::bare();
    signcfg_cmd()
        .arg("chipsets")
        .arg(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("configs"));
}

#[test]
fn test_init_chipset_creates_directory() {
    let root = ConfigRoot::new();
    signcfg_cmd()
        .arg("init-chipset")
        .arg(root.path())
        .arg("sdm999")
        .assert()
        .success();
    assert!(root.configs_dir().join("sdm999").is_dir());
}

// ============================================================================
// Document commands
// ============================================================================

#[test]
fn test_check_prints_sign_ids() {
    let root = sample_root();
    let file = root.configs_dir().join("sdm845").join("sdm845_secimage.xml");
    signcfg_cmd()
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("sdm845"))
        .stdout(predicate::str::contains("sbl1"))
        .stdout(predicate::str::contains("tz"));
}

#[test]
fn test_check_reports_duplicate_sign_ids() {
    let root = ConfigRoot::new();
    let config = SampleConfig::new("a").image(SampleImage::new("tz"));
    let file = root.write_config("a", "a_secimage.xml", &config.render());
    signcfg_cmd()
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("same sign_id: tz"));
}

#[test]
fn test_check_rejects_malformed_override() {
    let root = sample_root();
    let file = root.configs_dir().join("sm8150").join("sm8150_secimage.xml");
    signcfg_cmd()
        .arg("check")
        .arg(&file)
        .args(["--set", "debug"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TAG=VALUE"));
}

#[test]
fn test_sign_id_is_case_insensitive() {
    let root = sample_root();
    let file = root.configs_dir().join("sdm845").join("sdm845_secimage.xml");
    signcfg_cmd()
        .arg("sign-id")
        .arg(&file)
        .arg("trustzone")
        .assert()
        .success()
        .stdout(predicate::str::diff("tz\n"));
}

#[test]
fn test_generate_with_override() {
    let root = sample_root();
    let file = root.configs_dir().join("sdm845").join("sdm845_secimage.xml");
    let out = root.path().join("generated").join("sdm845_secimage.xml");
    signcfg_cmd()
        .arg("generate")
        .arg(&file)
        .arg(&out)
        .args(["--set", "oem_id=0x0011"])
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.matches("<oem_id>0x0011</oem_id>").count(), 3);
}

// ============================================================================
// Domain objects and profiles
// ============================================================================

#[test]
fn test_export_json() {
    let root = sample_root();
    let file = root.configs_dir().join("sdm845").join("sdm845_secimage.xml");
    signcfg_cmd()
        .arg("export")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"Cfg_Secimage\""));
}

#[test]
fn test_export_then_import_round_trip() {
    let root = sample_root();
    let file = root.configs_dir().join("sdm845").join("sdm845_secimage.xml");
    let output = signcfg_cmd()
        .arg("export")
        .arg(&file)
        .args(["--format", "yaml"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let object = root.write_file("object.yaml", &String::from_utf8(output.stdout).unwrap());
    let out = root.path().join("imported.xml");

    signcfg_cmd()
        .arg("import")
        .arg(&file)
        .arg(&object)
        .arg(&out)
        .assert()
        .success();

    signcfg_cmd()
        .arg("check")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("sdm845"));
}

#[test]
fn test_custom_profile_is_used() {
    let root = sample_root();
    let profile = root.path().join("profile.json");
    signcfg_cmd().arg("profile").arg(&profile).assert().success();

    let text = fs::read_to_string(&profile).unwrap();
    fs::write(&profile, text.replace("\"2.0\"", "\"9.9\"")).unwrap();

    signcfg_cmd()
        .arg("--profile")
        .arg(&profile)
        .arg("chipsets")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    signcfg_cmd()
        .env("SIGNCFG_PROFILE", &profile)
        .arg("check")
        .arg(root.configs_dir().join("sm8150").join("sm8150_secimage.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("9.9"));
}
