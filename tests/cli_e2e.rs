//! End-to-end CLI tests for the trainer-harvest binary.

#![allow(deprecated)]

mod support;
use support::site::{Row, article_page, listing_page, mount_article, mount_listing_page, render_row};
use support::socket_guard::start_mock_server_or_skip;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("trainer-harvest").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Collect ranked trainer teams"))
        .stdout(predicate::str::contains("--checkpoint-every"))
        .stdout(predicate::str::contains("--resume"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("trainer-harvest").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trainer-harvest"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("trainer-harvest").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_inverted_delay_range_fails() {
    let mut cmd = Command::cargo_bin("trainer-harvest").unwrap();
    cmd.args(["--min-delay-ms", "5000", "--max-delay-ms", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--min-delay-ms"));
}

#[test]
fn test_binary_missing_output_directory_fails_before_crawling() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("missing").join("out.json");

    let mut cmd = Command::cargo_bin("trainer-harvest").unwrap();
    cmd.arg("-q")
        .arg("--base-url")
        .arg("http://127.0.0.1:9")
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("output destination"));
}

#[tokio::test]
async fn test_binary_harvests_mock_site() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let uri = server.uri();

    let rows = render_row(
        &uri,
        &Row {
            rank: 4,
            rating: "2,099",
            name: "さぶろう",
            article: Some("/entry/4"),
            refs: &["0445-00"],
        },
    );
    mount_listing_page(&server, 1, listing_page(&rows, false)).await;
    mount_article(
        &server,
        "/entry/4",
        article_page(&["持ち物：きあいのタスキ", "性格：ようき"]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("teams.json");

    let mut cmd = Command::cargo_bin("trainer-harvest").unwrap();
    cmd.arg("--base-url")
        .arg(&uri)
        .arg("--output")
        .arg(&output)
        .args(["--min-delay-ms", "0", "--max-delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 trainers"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json[0]["trainer_name"], "さぶろう");
    assert_eq!(json[0]["rating"], 2099);
    assert_eq!(json[0]["pokemon"][0]["name"], "ガブリアス");
    assert_eq!(json[0]["pokemon"][0]["item"], "きあいのタスキ");
    assert_eq!(json[0]["pokemon"][0]["nature"], "ようき");
    assert_eq!(json[0]["pokemon"][0]["evs"]["S"], 0);
}
