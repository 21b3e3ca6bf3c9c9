//! End-to-end tests of the chirp binary.
//!
//! These exercise argument handling, help rendering, and exit codes only;
//! no test here is allowed to reach the network, so the sample config
//! deliberately carries no bearer token.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE_CONFIG: &str = "\
api_key: k
api_secret: s
access_token: t
access_secret: u
users:
  - username: alice
    token: alice-token
";

fn write_config(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("config.yml");
    std::fs::write(&path, SAMPLE_CONFIG).unwrap();
    path
}

fn chirp(config: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("chirp").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn no_arguments_prints_usage_and_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("<command> [arguments]"));
}

#[test]
fn help_prints_the_command_summary() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .arg("help")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("A command-line client for the Twitter API."))
        .stderr(predicate::str::contains("Subcommands:"))
        .stderr(predicate::str::contains("search"));
}

#[test]
fn help_for_a_command_shows_its_flags() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .args(["help", "search"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--query"))
        .stderr(predicate::str::contains("Search for recent tweets"));
}

#[test]
fn help_for_a_nested_command_resolves_the_path() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .args(["help", "tweet", "create"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--reply-to"));
}

#[test]
fn help_for_a_topic_prints_its_text() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .args(["help", "expansions"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("referenced_tweets.id"));
}

#[test]
fn help_for_an_unknown_name_is_diagnosed() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .args(["help", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("command \"nope\" not found"));
}

#[test]
fn unknown_flag_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .arg("--bogus")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn unknown_command_prints_a_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .arg("frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("command \"frobnicate\" not understood"));
}

#[test]
fn search_requires_a_query() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .arg("search")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("a search query must be provided"));
}

#[test]
fn lookup_requires_tweet_ids() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .arg("lookup")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no tweet IDs were specified"));
}

#[test]
fn tweet_create_rejects_an_empty_status() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .args(["tweet", "create"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: empty status update"));
}

#[test]
fn missing_config_file_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yml");
    let mut cmd = Command::cargo_bin("chirp").unwrap();
    cmd.env("CHIRP_CONFIG", &missing)
        .arg("lookup")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("loading configuration"));
}

#[test]
fn literal_help_argument_is_passed_to_the_action() {
    let dir = tempfile::tempdir().unwrap();
    // The action treats "help" as a tweet ID and then fails to find any
    // credentials, so nothing reaches the network.
    chirp(&write_config(&dir))
        .args(["lookup", "help"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ordinary argument"))
        .stderr(predicate::str::contains("no bearer token is available"));
}

#[test]
fn auth_user_without_a_token_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    chirp(&write_config(&dir))
        .args(["--auth-user", "nobody", "lookup", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no access token for user \"nobody\""));
}
