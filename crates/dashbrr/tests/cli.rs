//! End-to-end tests driving the `dashbrr` binary.
//!
//! Each test gets its own database file and config directory so nothing on
//! the host leaks in.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

struct Harness {
    dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    fn dashbrr(&self, args: &[&str]) -> Command {
        let db = self.dir.path().join("data").join("dashbrr.db");
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dashbrr"));
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env_remove("DASHBRR_DB_PATH")
            .env_remove("DASHBRR_PROBE_TIMEOUT_SECS")
            .env_remove("DASHBRR_LOG_LEVEL")
            .env_remove("RUST_LOG")
            .arg("--db")
            .arg(db)
            .arg("run")
            .args(args);
        cmd
    }
}

#[test]
fn run_without_command_lists_commands() {
    let h = Harness::new();
    h.dashbrr(&[])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No command specified"))
        .stderr(predicate::str::contains("Available commands:"))
        .stderr(predicate::str::contains("  service"));
}

#[test]
fn help_lists_top_level_commands_only() {
    let h = Harness::new();
    h.dashbrr(&["help"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Usage: dashbrr run <command> [arguments]",
        ))
        .stdout(predicate::str::contains("  health      Check system and service health"))
        .stdout(predicate::str::contains("  version     Show version information"))
        .stdout(predicate::str::contains("radarr").not());
}

#[test]
fn help_service_lists_types_and_actions() {
    let h = Harness::new();
    h.dashbrr(&["help", "service"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available service types:"))
        .stdout(predicate::str::contains("  maintainerr Maintainerr"));

    h.dashbrr(&["help", "service", "radarr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available actions for radarr:"))
        .stdout(predicate::str::contains("  add         Add a Radarr instance"));

    h.dashbrr(&["help", "service", "radarr", "add"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: dashbrr run service radarr add <url>"));
}

#[test]
fn version_json() {
    let h = Harness::new();
    h.dashbrr(&["version", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains(format!(
            "\"semver\": \"{}\"",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn service_type_without_action_shows_actions() {
    let h = Harness::new();
    h.dashbrr(&["service", "autobrr"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No action specified for service type 'autobrr'",
        ))
        .stderr(predicate::str::contains("Available actions for autobrr:"))
        .stderr(predicate::str::contains("  remove"));
}

#[test]
fn unknown_command_json_envelope() {
    let h = Harness::new();
    h.dashbrr(&["frobnicate", "--json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"success\":false"))
        .stdout(predicate::str::contains("\"code\":\"UNKNOWN_COMMAND\""));
}

#[test]
fn add_list_remove_roundtrip() {
    let h = Harness::new();

    h.dashbrr(&["service", "sonarr", "add", "http://sonarr:8989", "key-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as sonarr-1"));
    h.dashbrr(&[
        "service",
        "sonarr",
        "add",
        "http://sonarr-4k:8989",
        "key-2",
        "--name",
        "Sonarr 4K",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Added Sonarr 4K as sonarr-2"));

    h.dashbrr(&["service", "sonarr", "add", "http://sonarr:8989/", "key-3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already registered as sonarr-1"));

    h.dashbrr(&["service", "sonarr", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sonarr-1"))
        .stdout(predicate::str::contains("Sonarr 4K"))
        .stdout(predicate::str::contains("key-1").not());

    h.dashbrr(&["service", "sonarr", "remove", "http://sonarr:8989"])
        .assert()
        .success();
    h.dashbrr(&["service", "sonarr", "remove", "http://sonarr:8989"])
        .assert()
        .code(3);

    h.dashbrr(&["service", "sonarr", "add", "http://sonarr-new:8989", "key-4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as sonarr-3"));
}

#[test]
fn invalid_url_is_rejected() {
    let h = Harness::new();
    h.dashbrr(&["service", "radarr", "add", "ftp://radarr", "key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid URL 'ftp://radarr'"));
}

#[test]
fn user_create_and_duplicate() {
    let h = Harness::new();
    h.dashbrr(&["user", "create", "admin", "password123", "admin@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created user admin"));

    h.dashbrr(&["user", "create", "admin", "password456"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("User already exists"));

    h.dashbrr(&["user", "change-password", "admin", "password789"])
        .assert()
        .success();
    h.dashbrr(&["user", "change-password", "ghost", "password789"])
        .assert()
        .code(3);
}

#[test]
fn health_with_no_services() {
    let h = Harness::new();
    h.dashbrr(&["health", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"database\": \"online\""))
        .stdout(predicate::str::contains("\"service_count\": 0"));
}

#[test]
fn explicit_config_file_is_validated() {
    let h = Harness::new();
    let config = h.dir.path().join("dashbrr.toml");
    std::fs::write(&config, "probe_timeout_secs = 0\n").unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dashbrr"));
    cmd.env("XDG_CONFIG_HOME", h.dir.path().join("config"))
        .env_remove("DASHBRR_PROBE_TIMEOUT_SECS")
        .arg("--config")
        .arg(&config)
        .args(["run", "version"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains("probe_timeout_secs"));
}

#[test]
fn missing_config_file_is_a_user_error() {
    let h = Harness::new();
    let missing = h.dir.path().join("nope").join("dashbrr.toml");

    Command::new(env!("CARGO_BIN_EXE_dashbrr"))
        .env("XDG_CONFIG_HOME", h.dir.path().join("config"))
        .arg("--config")
        .arg(&missing)
        .args(["run", "version"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn help_and_version_run_without_a_usable_database() {
    let h = Harness::new();
    let blocker = h.dir.path().join("plain-file");
    std::fs::write(&blocker, "x").unwrap();
    let unusable = blocker.join("sub").join("d.db");

    for args in [["help"], ["version"]] {
        Command::new(env!("CARGO_BIN_EXE_dashbrr"))
            .env("XDG_CONFIG_HOME", h.dir.path().join("config"))
            .env_remove("DASHBRR_DB_PATH")
            .arg("--db")
            .arg(&unusable)
            .arg("run")
            .args(args)
            .assert()
            .success();
    }
}

#[test]
fn version_does_not_create_the_database() {
    let h = Harness::new();
    h.dashbrr(&["version"]).assert().success();
    assert!(!h.dir.path().join("data").exists());

    h.dashbrr(&["service", "radarr", "list"]).assert().success();
    assert!(h.dir.path().join("data").join("dashbrr.db").exists());
}

#[test]
fn health_json_with_broken_database_prints_one_document() {
    let h = Harness::new();
    let blocker = h.dir.path().join("plain-file");
    std::fs::write(&blocker, "x").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dashbrr"))
        .env("XDG_CONFIG_HOME", h.dir.path().join("config"))
        .env_remove("DASHBRR_DB_PATH")
        .arg("--db")
        .arg(blocker.join("sub").join("d.db"))
        .args(["run", "health", "--json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["success"], false);
    assert!(doc.get("error").is_some());
    assert!(doc.get("system").is_none());
}
