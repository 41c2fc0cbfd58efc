// tests/integration_test.rs
use std::process::Command;

#[test]
fn test_release_stats_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_release-stats"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-stats"));
    assert!(stdout.contains("Summarize GitHub release history"));
    assert!(stdout.contains("--repo"));
}

#[test]
fn test_release_stats_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_release-stats"))
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("release-stats "));
}

#[test]
fn test_release_stats_list_uses_repo_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_release-stats"))
        .args(["--list", "--repo", "daangn/stackflow", "--repo", "rust-lang/cargo"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("daangn/stackflow"));
    assert!(stdout.contains("rust-lang/cargo"));
}

#[test]
fn test_release_stats_rejects_malformed_repo() {
    let output = Command::new(env!("CARGO_BIN_EXE_release-stats"))
        .args(["--list", "--repo", "no-slash"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("OWNER/REPO"));
}

#[test]
fn test_config_loading() {
    use release_stats::config::{load_config, RepoTarget};

    let config = load_config(Some(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/releasestats.toml"
    ))).expect("fixture loads");
    assert_eq!(
        config.repositories,
        vec![
            RepoTarget::new("daangn", "stackflow"),
            RepoTarget::new("daangn", "seed-design"),
        ]
    );
    assert!(config.report.sort_by_date);
}
