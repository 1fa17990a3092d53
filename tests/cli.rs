use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pulse() -> Command {
    let mut cmd = Command::cargo_bin("pulse").unwrap();
    cmd.env_remove("JIRA_USER").env_remove("JIRA_API_TOKEN");
    cmd
}

/// Write a config pointing at files inside `dir`
fn write_config(dir: &TempDir, extra: &str) -> std::path::PathBuf {
    let path = dir.path().join("pulse.yaml");
    let body = format!(
        "jira:\n  base_url: http://127.0.0.1:9\n  project: PULSE\ncache:\n  path: {}\ntemplates: {}\nretry:\n  max_attempts: 1\n{}",
        dir.path().join("cache.json").display(),
        dir.path().join("templates.yaml").display(),
        extra
    );
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn help_lists_subcommands() {
    pulse()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("planning"))
        .stdout(predicate::str::contains("retro"));
}

#[test]
fn retro_requires_since() {
    pulse()
        .arg("retro")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--since"));
}

#[test]
fn retro_rejects_iso_date() {
    pulse()
        .args(["retro", "--since", "2026-10-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DD-MM-YYYY"));
}

#[test]
fn missing_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");

    pulse()
        .arg("planning")
        .arg("--config")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.yaml"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_without_project_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pulse.yaml");
    fs::write(&path, "jira:\n  base_url: https://example.atlassian.net\n").unwrap();

    pulse()
        .arg("planning")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("jira.project"));
}

#[test]
fn planning_without_templates_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    pulse()
        .arg("planning")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("templates.yaml"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn corrupt_cache_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");
    fs::write(dir.path().join("cache.json"), "[1, 2").unwrap();

    pulse()
        .args(["retro", "--since", "01-10-2026", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cache.json"))
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn retro_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");
    let cache = r#"{
        "type = Objective AND status = \"In Progress\"": [],
        "project = PULSE AND resolution = Done AND resolved >= \"2026-10-01\"": [
            {
                "key": "PULSE-9",
                "type": "Task",
                "status": "Done",
                "assignee": "Sam Lee",
                "summary": "Rotate keys",
                "resolved": "2026-10-03T12:00:00+00:00"
            }
        ]
    }"#;
    fs::write(dir.path().join("cache.json"), cache).unwrap();

    pulse()
        .args(["retro", "--since", "01-10-2026", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found."))
        .stdout(predicate::str::contains("Rotate keys (_Sam Lee_)"))
        .stdout(predicate::str::ends_with("Done: 1 issues\n"));
}

#[test]
fn schema_describes_config() {
    pulse()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url"))
        .stdout(predicate::str::contains("templates"));
}
