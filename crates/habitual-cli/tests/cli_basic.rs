//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary HOME, so the
//! config file and state database never touch the real user directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitual"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("HABITUAL_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(home: &TempDir, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn signed_in_home() -> TempDir {
    let home = TempDir::new().unwrap();
    run_ok(&home, &["account", "login", "user-1", "someone@example.com"]);
    home
}

#[test]
fn test_whoami_before_login() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["account", "whoami"]);
    assert!(out.contains("not signed in"));
}

#[test]
fn test_add_requires_login() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["habit", "add", "Read"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not signed in"));
}

#[test]
fn test_add_and_list_habit() {
    let home = signed_in_home();
    run_ok(&home, &["habit", "add", "Read", "--icon", "book"]);
    let out = run_ok(&home, &["habit", "list"]);
    assert!(out.contains("Read"));
    assert!(out.contains("[book]"));
}

#[test]
fn test_add_rejects_bad_color() {
    let home = signed_in_home();
    let (code, _, _) = run_cli(&home, &["habit", "add", "Read", "--color", "blue"]);
    assert_ne!(code, 0);
}

#[test]
fn test_complete_builds_streak_and_milestone() {
    let home = signed_in_home();
    run_ok(&home, &["habit", "add", "Run"]);
    let today = chrono::Local::now().date_naive();
    let mut last = String::new();
    for offset in (0..7).rev() {
        let date = (today - chrono::Duration::days(offset)).format("%Y-%m-%d").to_string();
        last = run_ok(&home, &["habit", "complete", "run", "--date", &date]);
    }
    assert!(last.contains("1 week streak"), "got: {last}");
    assert!(last.contains("Run: 7 day streak"));

    let out = run_ok(&home, &["notification", "list", "--unread"]);
    assert!(out.contains("1 unread"));
}

#[test]
fn test_uncomplete_is_accepted_for_missing_day() {
    let home = signed_in_home();
    run_ok(&home, &["habit", "add", "Journal"]);
    run_ok(&home, &["habit", "uncomplete", "Journal", "--date", "2024-01-01"]);
}

#[test]
fn test_invalid_date_is_rejected() {
    let home = signed_in_home();
    run_ok(&home, &["habit", "add", "Journal"]);
    let (code, _, _) = run_cli(&home, &["habit", "complete", "Journal", "--date", "yesterday"]);
    assert_ne!(code, 0);
}

#[test]
fn test_stats_json() {
    let home = signed_in_home();
    run_ok(&home, &["habit", "add", "Read"]);
    run_ok(&home, &["habit", "complete", "Read"]);
    let out = run_ok(&home, &["stats", "--json"]);
    let stats: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(stats["totalHabits"], 1);
    assert_eq!(stats["completedToday"], 1);
}

#[test]
fn test_prefs_set_and_show() {
    let home = TempDir::new().unwrap();
    run_ok(&home, &["prefs", "set", "--theme", "dark", "--week-starts-on", "0"]);
    let out = run_ok(&home, &["prefs", "show"]);
    let prefs: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(prefs["theme"], "dark");
    assert_eq!(prefs["weekStartsOn"], 0);
}

#[test]
fn test_export_then_import_into_fresh_home() {
    let home = signed_in_home();
    run_ok(&home, &["habit", "add", "Read"]);
    run_ok(&home, &["habit", "complete", "Read"]);
    let export = home.path().join("export.json");
    run_ok(&home, &["data", "export", "-o", export.to_str().unwrap()]);

    let other = TempDir::new().unwrap();
    let out = run_ok(&other, &["data", "import", export.to_str().unwrap()]);
    assert!(out.contains("imported 1 habits"));
    assert!(run_ok(&other, &["habit", "list"]).contains("Read"));
}

#[test]
fn test_import_rejects_document_without_habits() {
    let home = TempDir::new().unwrap();
    let bad = home.path().join("bad.json");
    std::fs::write(&bad, r#"{"userPreferences":{"theme":"dark"}}"#).unwrap();
    let (code, _, stderr) = run_cli(&home, &["data", "import", bad.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not a valid export"));
}

#[test]
fn test_suggest_category() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["suggest", "health"]);
    assert!(!out.trim().is_empty());
    let (code, _, _) = run_cli(&home, &["suggest", "cooking"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();
    run_ok(&home, &["config", "set", "defaults.color", "#10B981"]);
    let out = run_ok(&home, &["config", "get", "defaults.color"]);
    assert_eq!(out.trim(), "#10B981");
    let (code, _, _) = run_cli(&home, &["config", "get", "nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_list_shows_habit_keys() {
    let home = TempDir::new().unwrap();
    let out = run_ok(&home, &["config", "list"]);
    assert!(out.contains("remote.base_url = \n"));
    assert!(out.contains("defaults.icon = activity"));
    assert!(out.contains("defaults.frequency = daily"));
    assert!(out.contains("# mode: offline"));
}

#[test]
fn test_config_set_rejects_bad_default_color() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&home, &["config", "set", "defaults.color", "blue"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("defaults.color"));
    let out = run_ok(&home, &["config", "get", "defaults.color"]);
    assert_eq!(out.trim(), "#6366F1");
}

#[test]
fn test_future_completion_does_not_count() {
    let home = signed_in_home();
    run_ok(&home, &["habit", "add", "Journal"]);
    let tomorrow = chrono::Local::now().date_naive() + chrono::Duration::days(1);
    let date = tomorrow.format("%Y-%m-%d").to_string();
    let out = run_ok(&home, &["habit", "complete", "Journal", "--date", &date]);
    assert!(out.contains("Journal: 0 day streak"), "got: {out}");
}

#[test]
fn test_logout_clears_habits() {
    let home = signed_in_home();
    run_ok(&home, &["habit", "add", "Read"]);
    run_ok(&home, &["account", "logout"]);
    let out = run_ok(&home, &["habit", "list"]);
    assert!(!out.contains("Read"));
}

#[test]
fn test_config_reset_repairs_unparsable_file() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("habitual");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "remote = [not toml").unwrap();

    let (code, _, _) = run_cli(&home, &["config", "list"]);
    assert_ne!(code, 0);
    run_ok(&home, &["config", "reset"]);
    let out = run_ok(&home, &["config", "get", "defaults.frequency"]);
    assert_eq!(out.trim(), "daily");
}
