use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::{contains, starts_with};
use tempfile::TempDir;

fn sue(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sue"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("MISTRAL_API_KEY")
        .env_remove("BRAVE_API_KEY")
        .env_remove("SUE_CONFIG")
        .env_remove("SUE_MODEL");
    cmd
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    sue(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Sue"));
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    sue(&home).arg("--version").assert().success();
}

#[test]
fn test_cli_completions() {
    let home = TempDir::new().unwrap();
    sue(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(starts_with("_sue"));
}

#[test]
fn test_search_help_lists_result_count() {
    let home = TempDir::new().unwrap();
    sue(&home)
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(contains("--num-results"));
}

#[test]
fn test_fetch_rejects_non_http_scheme() {
    let home = TempDir::new().unwrap();
    sue(&home)
        .args(["fetch", "ftp://example.com/file"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Scheme 'ftp' is not allowed"));
}

#[test]
fn test_fetch_works_without_api_key() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.toml");
    std::fs::write(&config, "[web]\ntimeout_secs = 1\n").unwrap();

    sue(&home)
        .arg("--config")
        .arg(&config)
        .args(["fetch", "not a url"])
        .assert()
        .failure()
        .stderr(contains("Invalid URL"))
        .stderr(contains("MISTRAL_API_KEY").not());
}
