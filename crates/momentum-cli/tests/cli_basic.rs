//! Basic CLI E2E tests.
//!
//! Each test runs the compiled binary against a throwaway home
//! directory so no state leaks between tests or into the real
//! environment.

use std::process::Command;

struct Cli {
    home: tempfile::TempDir,
}

impl Cli {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp home"),
        }
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_momentum-cli"))
            .args(args)
            .env("HOME", self.home.path())
            .env("MOMENTUM_ENV", "dev")
            .output()
            .expect("failed to run momentum-cli");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);

        (stdout, stderr, code)
    }

    /// Run a CLI command and expect success.
    fn run_ok(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "command {args:?} failed: {stderr}");
        stdout
    }

    /// Run a CLI command and parse its stdout as JSON.
    fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let stdout = self.run_ok(args);
        serde_json::from_str(&stdout).expect("JSON output")
    }
}

#[test]
fn schedule_show_lists_seeded_slots() {
    let cli = Cli::new();
    let slots = cli.run_json(&["schedule", "show"]);
    let slots = slots.as_array().expect("array output");
    assert_eq!(slots.len(), 10);
    assert_eq!(slots[0]["activity"], "Wake Up + Hydrate");
    assert_eq!(slots[0]["completed"], false);
}

#[test]
fn habit_list_shows_seeded_habits() {
    let cli = Cli::new();
    let habits = cli.run_json(&["habit", "list"]);
    let habits = habits.as_array().expect("array output");
    assert_eq!(habits.len(), 7);
    assert_eq!(habits[0]["name"], "5 Hours Deep Work");
    assert_eq!(habits[0]["completed"], false);
}

#[test]
fn todo_add_list_done_roundtrip() {
    let cli = Cli::new();
    cli.run_ok(&["todo", "add", "Ship the landing page", "--priority"]);

    let todos = cli.run_json(&["todo", "list"]);
    let todos = todos.as_array().expect("array output");
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["title"], "Ship the landing page");
    assert_eq!(todos[0]["is_priority"], true);
    assert_eq!(todos[0]["is_done"], false);

    let id = todos[0]["id"].as_str().expect("todo id").to_string();
    cli.run_ok(&["todo", "done", &id]);

    let todos = cli.run_json(&["todo", "list"]);
    assert_eq!(todos[0]["is_done"], true);
}

#[test]
fn completing_a_todo_records_the_day() {
    let cli = Cli::new();
    cli.run_ok(&["todo", "add", "Write tests"]);
    let todos = cli.run_json(&["todo", "list"]);
    let id = todos[0]["id"].as_str().expect("todo id").to_string();
    cli.run_ok(&["todo", "done", &id]);

    let stats = cli.run_json(&["stats", "today"]);
    assert!(stats["today_score"].as_f64().expect("score") > 0.0);
    assert_eq!(stats["today_grade"], "C");
    assert_eq!(stats["streak"], 1);
}

#[test]
fn fresh_store_grades_na() {
    let cli = Cli::new();
    let stats = cli.run_json(&["stats", "today"]);
    assert_eq!(stats["streak"], 0);
    assert_eq!(stats["week_progress"], 0);
    assert_eq!(stats["today_grade"], "N/A");
}

#[test]
fn checking_a_slot_counts_toward_score() {
    let cli = Cli::new();
    let slots = cli.run_json(&["schedule", "show"]);
    let id = slots[0]["id"].as_str().expect("slot id").to_string();

    cli.run_ok(&["schedule", "check", &id]);
    let slots = cli.run_json(&["schedule", "show"]);
    assert_eq!(slots[0]["completed"], true);

    let stats = cli.run_json(&["stats", "today"]);
    assert!(stats["today_score"].as_f64().expect("score") > 0.0);
}

#[test]
fn habit_check_does_not_record_the_day() {
    let cli = Cli::new();
    let habits = cli.run_json(&["habit", "list"]);
    let id = habits[0]["id"].as_str().expect("habit id").to_string();

    cli.run_ok(&["habit", "check", &id]);
    let habits = cli.run_json(&["habit", "list"]);
    let checked = habits
        .as_array()
        .expect("array output")
        .iter()
        .any(|h| h["id"] == id.as_str() && h["completed"] == true);
    assert!(checked);

    // Habits are not scoring-relevant, so nothing was flushed.
    let stats = cli.run_json(&["stats", "today"]);
    assert_eq!(stats["today_grade"], "N/A");
}

#[test]
fn timer_start_status_stop() {
    let cli = Cli::new();
    let snap = cli.run_json(&["timer", "start"]);
    assert_eq!(snap["state"], "running");

    let snap = cli.run_json(&["timer", "status"]);
    assert_eq!(snap["state"], "running");

    let snap = cli.run_json(&["timer", "stop"]);
    assert_eq!(snap["state"], "idle");

    // Stopping the timer records the day.
    let stats = cli.run_json(&["stats", "today"]);
    assert_eq!(stats["today_grade"], "C");
}

#[test]
fn roadmap_show_and_set_status() {
    let cli = Cli::new();
    let months = cli.run_json(&["roadmap", "show"]);
    let months = months.as_array().expect("array output");
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["weeks"].as_array().expect("weeks").len(), 4);
    assert_eq!(months[0]["weeks"][0]["status"], "current");

    cli.run_ok(&["roadmap", "set-status", "week-2", "done"]);
    let months = cli.run_json(&["roadmap", "show"]);
    assert_eq!(months[0]["weeks"][1]["status"], "done");
}

#[test]
fn unknown_week_status_is_rejected() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["roadmap", "set-status", "week-1", "later"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown status"), "stderr: {stderr}");
}

#[test]
fn metrics_record_carries_unspecified_fields_forward() {
    let cli = Cli::new();
    let out = cli.run_ok(&["metrics", "latest"]);
    assert!(out.contains("No metrics recorded yet"));

    cli.run_ok(&["metrics", "record", "--revenue", "50000", "--products", "1"]);
    let m = cli.run_json(&["metrics", "latest"]);
    assert_eq!(m["revenue"], 50000);
    assert_eq!(m["products_live"], 1);
    assert_eq!(m["followers_instagram"], 0);

    cli.run_ok(&["metrics", "record", "--instagram", "1200"]);
    let m = cli.run_json(&["metrics", "latest"]);
    assert_eq!(m["revenue"], 50000);
    assert_eq!(m["followers_instagram"], 1200);
}

#[test]
fn config_set_then_get() {
    let cli = Cli::new();
    cli.run_ok(&["config", "set", "scoring.streak_min_score", "0.25"]);
    let out = cli.run_ok(&["config", "get", "scoring.streak_min_score"]);
    assert_eq!(out.trim(), "0.25");
}

#[test]
fn config_get_unknown_key_fails() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["config", "get", "nope.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"), "stderr: {stderr}");
}

#[test]
fn invalid_date_argument_is_rejected() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["todo", "list", "--date", "not-a-date"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid date"), "stderr: {stderr}");
}

#[test]
fn done_on_unknown_todo_fails() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["todo", "done", "missing-id"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown todo id"), "stderr: {stderr}");
}

#[test]
fn status_reports_plan_context() {
    let cli = Cli::new();
    let view = cli.run_json(&["status"]);
    assert!(view["plan_day"].as_i64().expect("plan day") >= 1);
    assert_eq!(view["plan_length"], 365);
    assert!(!view["quote"].as_str().expect("quote").is_empty());
    assert_eq!(view["slots_total"], 10);
    assert_eq!(view["habits_total"], 7);
    assert_eq!(view["stats"]["today_grade"], "N/A");
}

#[test]
fn watch_flushes_once_per_interval() {
    let cli = Cli::new();
    let out = cli.run_ok(&["watch", "--ticks", "2"]);
    let first = out.lines().next().expect("one flush line");
    let outcome: serde_json::Value = serde_json::from_str(first).expect("flush JSON");
    assert_eq!(outcome["counters"]["schedule_total"], 10);

    // The second tick lands inside the default 30s interval.
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn completions_cover_all_commands() {
    let cli = Cli::new();
    let out = cli.run_ok(&["completions", "bash"]);
    assert!(out.contains("momentum-cli"));
    assert!(out.contains("roadmap"));
}
