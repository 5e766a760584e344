use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use clap::Parser;
use formfill_cli::cli::commands::Commands;
use formfill_cli::cli::env::CliArgs;
use formfill_cli::config::{ENV_CHROME, ENV_ENDPOINT, ENV_HEADLESS};
use tempfile::tempdir;

fn formfill() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("formfill"));
    cmd.env_remove(ENV_HEADLESS)
        .env_remove(ENV_ENDPOINT)
        .env_remove(ENV_CHROME)
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn fill_flags_parse() {
    let args = CliArgs::try_parse_from([
        "formfill",
        "-l",
        "debug",
        "fill",
        "--url",
        "https://example.test",
        "--only-required",
        "--include-filled",
        "--headless",
    ])
    .unwrap();
    assert_eq!(args.log_level, "debug");
    match args.command {
        Commands::Fill(fill) => {
            assert_eq!(fill.url.as_deref(), Some("https://example.test"));
            assert!(fill.only_required && fill.include_filled && fill.headless);
            assert!(fill.endpoint.is_none());
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(CliArgs::try_parse_from(["formfill", "clear"]).is_err());
}

#[test]
fn config_init_then_validate_and_get() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("formfill.yaml");
    let path_arg = path.to_str().unwrap();

    formfill()
        .args(["-c", path_arg, "config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    formfill()
        .args(["-c", path_arg, "config", "init"])
        .assert()
        .failure();

    formfill()
        .args(["-c", path_arg, "config", "validate"])
        .assert()
        .success();

    let assert = formfill()
        .args(["-c", path_arg, "config", "get", "engine.multi_select_picks"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.trim(), "2");
}

#[test]
fn config_set_persists_and_rejects_invalid_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("formfill.yaml");
    let path_arg = path.to_str().unwrap();

    formfill()
        .args(["-c", path_arg, "config", "set", "browser.headless", "true"])
        .assert()
        .success();
    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("headless: true"));

    formfill()
        .args(["-c", path_arg, "config", "set", "browser.deadline_ms", "0"])
        .assert()
        .failure();
}

#[test]
fn validate_reports_broken_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("formfill.yaml");
    fs::write(&path, "browser:\n  deadline_ms: 0\n").unwrap();

    formfill()
        .args(["-c", path.to_str().unwrap(), "config", "validate"])
        .assert()
        .failure();
}

#[test]
fn show_applies_environment_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.yaml");

    let assert = formfill()
        .env(ENV_ENDPOINT, "ws://127.0.0.1:9222/devtools/browser/abc")
        .args(["-c", path.to_str().unwrap(), "config", "show"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("ws://127.0.0.1:9222/devtools/browser/abc"));
}
