use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = r#"
target:
  list: household
  database: tasks.db
sync:
  horizonDays: 7
  lookbackDays: 7
rules:
  - id: plants
    title: Water the plants
    schedule:
      kind: every_n_days
      everyNDays: 1
"#;

/// Writes a config file into a fresh temporary directory
fn setup(config: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("taskseed.yaml");
    std::fs::write(&path, config).expect("Failed to write config");
    (temp_dir, path)
}

/// Plain-output command without inherited taskseed environment.
///
/// Color is turned off through the environment: a flag before the
/// subcommand would conflict with it.
fn taskseed_cmd() -> Command {
    let mut cmd = Command::cargo_bin("taskseed").expect("Failed to find taskseed binary");
    cmd.env_remove("TASKSEED_CONFIG")
        .env_remove("TASKSEED_DRY_RUN")
        .env_remove("TASKSEED_VERBOSE")
        .env_remove("TASKSEED_HORIZON_DAYS")
        .env_remove("TASKSEED_LOOKBACK_DAYS")
        .env("TASKSEED_NO_COLOR", "true");
    cmd
}

fn config_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_sync_creates_todays_occurrence() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .args(["sync", "--config", config_arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Sync complete"))
        .stdout(predicate::str::contains("- **Created**: 1"))
        .stdout(predicate::str::contains("created \"Water the plants\""));
}

#[test]
fn test_second_sync_is_gated() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .args(["sync", "--config", config_arg(&config)])
        .assert()
        .success();

    taskseed_cmd()
        .args(["sync", "--config", config_arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Created**: 0"))
        .stdout(predicate::str::contains("- **Open**: 1"))
        .stdout(predicate::str::contains("open task exists"));
}

#[test]
fn test_sync_is_the_default_command() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .args(["--config", config_arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Sync complete"));
}

#[test]
fn test_top_level_flags_conflict_with_subcommand() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .args(["--config", config_arg(&config), "sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sync"));
}

#[test]
fn test_global_flag_after_subcommand() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .args(["sync", "--config", config_arg(&config), "--no-color", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Sync complete"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .args(["sync", "--dry-run", "--config", config_arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Dry run"))
        .stdout(predicate::str::contains("- **Planned**: 1"))
        .stdout(predicate::str::contains("would create"));

    taskseed_cmd()
        .args(["tasks", "list", "--all", "--config", config_arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_dry_run_from_environment() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .env("TASKSEED_DRY_RUN", "true")
        .env("TASKSEED_CONFIG", config_arg(&config))
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Dry run"));
}

#[test]
fn test_window_overrides_from_environment() {
    let (_dir, config) = setup(CONFIG);
    let today = jiff::Timestamp::now()
        .to_zoned(jiff::tz::TimeZone::UTC)
        .date();
    let start = today.checked_sub(jiff::Span::new().days(2)).unwrap();
    let end = today.checked_add(jiff::Span::new().days(1)).unwrap();

    taskseed_cmd()
        .env("TASKSEED_HORIZON_DAYS", "1")
        .env("TASKSEED_LOOKBACK_DAYS", "2")
        .args(["sync", "--dry-run", "--config", config_arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "- **Window**: {start} to {end}"
        )));
}

#[test]
fn test_zero_horizon_from_environment_fails() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .env("TASKSEED_HORIZON_DAYS", "0")
        .args(["sync", "--config", config_arg(&config)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--horizon-days"));
}

#[test]
fn test_invalid_config_fails() {
    let (_dir, config) = setup(
        "target:\n  list: household\nsync:\n  horizonDays: 0\n  lookbackDays: 7\n",
    );

    taskseed_cmd()
        .args(["sync", "--config", config_arg(&config)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains("sync.horizonDays"));
}

#[test]
fn test_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");

    taskseed_cmd()
        .args(["doctor", "--config", config_arg(&missing)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_doctor_reports_configuration() {
    let (dir, config) = setup(CONFIG);

    taskseed_cmd()
        .args(["doctor", "--config", config_arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Configuration OK"))
        .stdout(predicate::str::contains("- **List**: household"))
        .stdout(predicate::str::contains("- **Rules**: 1"));

    assert!(dir.path().join("tasks.db").exists());
}

#[test]
fn test_database_file_flag_overrides_config() {
    let (dir, config) = setup(CONFIG);
    let db_path = dir.path().join("other.db");

    taskseed_cmd()
        .args([
            "sync",
            "--config",
            config_arg(&config),
            "--database-file",
            db_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(db_path.exists());
    assert!(!dir.path().join("tasks.db").exists());
}

#[test]
fn test_tasks_add_list_and_complete() {
    let (_dir, config) = setup(CONFIG);
    let config = config_arg(&config);

    taskseed_cmd()
        .args(["tasks", "add", "Buy milk", "--due", "2023-01-01", "--config", config])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task"))
        .stdout(predicate::str::contains("Buy milk"));

    let output = taskseed_cmd()
        .args(["tasks", "list", "--json", "--config", config])
        .output()
        .expect("Failed to run tasks list");
    assert!(output.status.success());

    let tasks: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Failed to parse JSON output");
    let task = &tasks.as_array().unwrap()[0];
    assert_eq!(task["summary"], "Buy milk");
    assert_eq!(task["due_date"], "2023-01-01");
    assert_eq!(task["completed"], false);
    let uid = task["uid"].as_str().unwrap().to_string();

    taskseed_cmd()
        .args(["tasks", "complete", uid.as_str(), "--config", config])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Completed task `{uid}`")));

    taskseed_cmd()
        .args(["tasks", "list", "--config", config])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));

    taskseed_cmd()
        .args(["tasks", "list", "--all", "--config", config])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [x] **Buy milk**"));
}

#[test]
fn test_manual_task_does_not_gate_rules() {
    let (_dir, config) = setup(CONFIG);
    let config = config_arg(&config);
    let today = jiff::Timestamp::now()
        .to_zoned(jiff::tz::TimeZone::UTC)
        .date()
        .to_string();

    taskseed_cmd()
        .args(["tasks", "add", "Water the plants", "--due", today.as_str(), "--config", config])
        .assert()
        .success();

    taskseed_cmd()
        .args(["sync", "--config", config])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Created**: 1"))
        .stdout(predicate::str::contains("- **Ignored tasks**: 1"));
}

#[test]
fn test_complete_unknown_task_fails() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .args(["tasks", "complete", "missing", "--config", config_arg(&config)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_due_date_fails() {
    let (_dir, config) = setup(CONFIG);

    taskseed_cmd()
        .args(["tasks", "add", "Oops", "--due", "tomorrow", "--config", config_arg(&config)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid due date"));
}

#[test]
fn test_version_flag() {
    taskseed_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("taskseed"));
}
