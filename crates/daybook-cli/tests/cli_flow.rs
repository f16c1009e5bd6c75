use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const TODAY: &str = "2024-03-15";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_daybook"))
}

/// Isolated config and data directories for one test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("DAYBOOK_CONFIG", self.config_path())
            .env("DAYBOOK_DIR", self.data_dir())
            .env("DAYBOOK_TODAY", TODAY)
            .env("NO_COLOR", "1")
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg-config"))
            .env("XDG_DATA_HOME", self.dir.path().join("xdg-data"))
            .env_remove("DAYBOOK_LOG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.cmd().args(args).output().expect("run daybook")
    }

    fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "daybook {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn json(&self, args: &[&str]) -> Value {
        let stdout = self.ok(args);
        serde_json::from_str(&stdout).expect("valid JSON output")
    }

    fn add(&self, date: &str, message: &str, rating: &str) -> String {
        let value = self.json(&["add", "--json", "--date", date, "-m", message, "-r", rating]);
        value["id"].as_str().expect("entry id").to_string()
    }
}

#[test]
fn test_cli_add_then_day_json() {
    let sandbox = Sandbox::new();

    let first = sandbox.json(&[
        "add",
        "--json",
        "--date",
        "2024-03-01",
        "-m",
        "Walked to the lake",
        "-r",
        "3",
        "-c",
        "Outdoors, Family",
    ]);
    assert_eq!(first["date_key"], "2024-03-01");
    assert_eq!(first["date"], "Fri, Mar 1, 2024");
    assert_eq!(first["categories"], serde_json::json!(["Outdoors", "Family"]));

    let second = sandbox.json(&["add", "--json", "--date", "2024-03-01", "-m", "Dinner", "-r", "4.5"]);
    assert_eq!(second["categories"], serde_json::json!(["Personal"]));

    let day = sandbox.json(&["day", "--json", "2024-03-01"]);
    assert_eq!(day["count"], 2);
    assert_eq!(day["long_date"], "Friday, March 1, 2024");
    assert_eq!(day["entries"][0]["description"], "Dinner");
    assert_eq!(day["entries"][1]["description"], "Walked to the lake");

    let empty = sandbox.json(&["day", "--json", "2024-03-02"]);
    assert_eq!(empty["count"], 0);
}

#[test]
fn test_cli_add_defaults_to_today() {
    let sandbox = Sandbox::new();
    let value = sandbox.json(&["add", "--json", "--no-input", "-m", "Quiet day"]);
    assert_eq!(value["date_key"], TODAY);
    assert_eq!(value["rating"], 4.0);
}

#[test]
fn test_cli_dates_sorted_across_eras() {
    let sandbox = Sandbox::new();
    sandbox.add("2024-03-01", "Modern", "4");
    sandbox.add("-0043-03-15", "Ides of March", "1");
    sandbox.add("12000-01-01", "Far future", "5");

    let dates = sandbox.json(&["dates", "--json"]);
    let keys: Vec<&str> = dates
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["date_key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["-999956-03-15", "2024-03-01", "~012000-01-01"]);
    assert_eq!(dates[0]["date"], "Sat, Mar 15, 44 BC");
}

#[test]
fn test_cli_edit_moves_entry() {
    let sandbox = Sandbox::new();
    let id = sandbox.add("2024-03-01", "Read a book", "3");

    let edited = sandbox.json(&["edit", "--json", "--date", "2024-04-02", "-r", "5", &id]);
    assert_eq!(edited["id"], id.as_str());
    assert_eq!(edited["date_key"], "2024-04-02");
    assert_eq!(edited["rating"], 5.0);
    assert_eq!(edited["description"], "Read a book");

    assert_eq!(sandbox.json(&["day", "--json", "2024-03-01"])["count"], 0);
    assert_eq!(sandbox.json(&["day", "--json", "2024-04-02"])["count"], 1);
}

#[test]
fn test_cli_edit_by_short_id() {
    let sandbox = Sandbox::new();
    let id = sandbox.add("2024-03-01", "Typo here", "3");
    let short = &id["entry-".len().."entry-".len() + 8];

    let edited = sandbox.json(&["edit", "--json", "-m", "Fixed text", short]);
    assert_eq!(edited["description"], "Fixed text");
    assert_eq!(edited["date_key"], "2024-03-01");
}

#[test]
fn test_cli_delete_entry_and_missing_entry() {
    let sandbox = Sandbox::new();
    let id = sandbox.add("2024-03-01", "Short-lived", "2");

    let missing = sandbox.run(&["delete", "2024-03-01", "entry-does-not-exist"]);
    assert!(missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("nothing deleted"));

    let wrong_day = sandbox.run(&["delete", "2024-03-02", &id]);
    assert!(wrong_day.status.success());
    assert_eq!(sandbox.json(&["day", "--json", "2024-03-01"])["count"], 1);

    let stdout = sandbox.ok(&["delete", "2024-03-01", &id]);
    assert!(stdout.contains("status=ok"));
    assert!(stdout.contains("remaining=0"));
    assert_eq!(sandbox.json(&["dates", "--json"]), serde_json::json!([]));
}

#[test]
fn test_cli_cards_window() {
    let sandbox = Sandbox::new();
    sandbox.add("2024-03-01", "First", "3");
    sandbox.add("2024-03-02", "Second", "3");
    sandbox.add("2024-03-03", "Third", "3");

    let cards = sandbox.json(&["cards", "--no-input", "--json", "--date", "2024-03-02", "--radius", "1"]);
    assert_eq!(cards["total"], 3);
    assert_eq!(cards["cursor"], 1);
    assert_eq!(cards["has_prev"], true);
    assert_eq!(cards["has_next"], true);
    let offsets: Vec<i64> = cards["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["offset"].as_i64().unwrap())
        .collect();
    assert_eq!(offsets, vec![-1, 0, 1]);
    assert_eq!(cards["cards"][1]["entry"]["description"], "Second");

    let default_open = sandbox.json(&["cards", "--no-input", "--json"]);
    assert_eq!(default_open["cursor"], 0);
    assert_eq!(default_open["has_prev"], false);

    let missing = sandbox.run(&["cards", "--no-input", "--date", "2024-05-05"]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_cli_cards_empty_store() {
    let sandbox = Sandbox::new();
    let cards = sandbox.json(&["cards", "--no-input", "--json"]);
    assert_eq!(cards["total"], 0);
    assert_eq!(cards["cursor"], Value::Null);
}

#[test]
fn test_cli_calendar_navigation_persists_anchor() {
    let sandbox = Sandbox::new();
    sandbox.add("2024-04-10", "Spring", "4");

    let shown = sandbox.json(&["calendar", "--json"]);
    assert_eq!(shown["anchor"], "2024-03");
    assert_eq!(shown["months"].as_array().unwrap().len(), 3);
    assert_eq!(shown["navigation"], Value::Null);

    let next = sandbox.json(&["calendar", "--json", "next"]);
    assert_eq!(next["anchor"], "2024-04");
    assert_eq!(next["navigation"]["kind"], "month_step");
    assert_eq!(next["navigation"]["settle_ms"], 200);
    assert_eq!(next["months"][1]["total_entries"], 1);
    assert_eq!(next["months"][1]["days"][0]["date_key"], "2024-04-10");

    let reopened = sandbox.json(&["calendar", "--json"]);
    assert_eq!(reopened["anchor"], "2024-04");

    let far = sandbox.json(&["calendar", "--json", "jump", "2030-01-01"]);
    assert_eq!(far["anchor"], "2030-01");
    assert_eq!(far["navigation"]["rebuilt"], true);
    assert_eq!(far["navigation"]["scroll_to"]["month"], "2030-01");

    let near = sandbox.json(&["calendar", "--json", "jump", "2030-02-10"]);
    assert_eq!(near["navigation"]["rebuilt"], false);
    assert_eq!(near["navigation"]["scroll_to"]["day"], "2030-02-10");
    assert_eq!(near["anchor"], "2030-02");

    let today = sandbox.json(&["calendar", "--json", "today"]);
    assert_eq!(today["anchor"], "2024-03");
    assert_eq!(today["months"][1]["contains_today"], true);
}

#[test]
fn test_cli_calendar_jump_to_earliest_year() {
    let sandbox = Sandbox::new();
    let jumped = sandbox.json(&["calendar", "--json", "jump", "-262143-02-01"]);
    assert_eq!(jumped["anchor"], "-262143-02");
    assert_eq!(jumped["navigation"]["rebuilt"], true);
    assert_eq!(jumped["months"].as_array().unwrap().len(), 3);

    let shown = sandbox.ok(&["calendar", "--months", "1"]);
    assert!(shown.contains("anchor=-262143-02"));
}

#[test]
fn test_cli_calendar_year_steps() {
    let sandbox = Sandbox::new();
    let back = sandbox.json(&["calendar", "--json", "--months", "0", "prev-year"]);
    assert_eq!(back["anchor"], "2023-03");
    assert_eq!(back["navigation"]["kind"], "year_step");
    assert_eq!(back["months"].as_array().unwrap().len(), 1);
}

#[test]
fn test_cli_years_around_bc() {
    let sandbox = Sandbox::new();
    let years = sandbox.json(&["years", "--json", "--rows", "2", "--around", "-43"]);
    assert_eq!(years["selected"], -43);
    let labels: Vec<&str> = years["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["46 BC", "45 BC", "44 BC", "43 BC", "42 BC"]);
}

#[test]
fn test_cli_years_scroll_near_top_prepends() {
    let sandbox = Sandbox::new();
    let years = sandbox.json(&[
        "years",
        "--json",
        "--around",
        "2000",
        "--scroll-top",
        "50",
        "--viewport",
        "400",
    ]);
    assert_eq!(years["scroll"]["prepended"], 100);
    assert_eq!(years["scroll"]["appended"], 0);
    assert_eq!(years["scroll"]["scroll_adjust_px"], 4000.0);
    assert_eq!(years["first"], 1400);
}

#[test]
fn test_cli_key_for_bc_date() {
    let sandbox = Sandbox::new();
    let key = sandbox.json(&["key", "--json", "-0043-03-15"]);
    assert_eq!(key["key"], "-999956-03-15");
    assert_eq!(key["display"], "Sat, Mar 15, 44 BC");
    assert_eq!(key["year_label"], "44 BC");

    let plain = sandbox.ok(&["key", "2024-03-01"]);
    assert!(plain.contains("key=2024-03-01"));
    assert!(plain.contains("long_display=Friday, March 1, 2024"));
}

#[test]
fn test_cli_invalid_rating_exit_code() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["add", "-m", "Too good", "-r", "7"]);
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error="));
    assert!(stderr.contains("hint="));
}

#[test]
fn test_cli_invalid_date_exit_code() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["day", "2024-13-01"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_cli_unknown_entry_exit_code() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["edit", "-r", "3", "entry-does-not-exist"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_cli_init_writes_config_and_sets_default_category() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.ok(&["init", "--no-input", "--default-category", "Work"]);
    assert!(stdout.contains("status=ok"));
    assert!(sandbox.config_path().exists());
    assert!(sandbox.data_dir().is_dir());

    let contents = std::fs::read_to_string(sandbox.config_path()).unwrap();
    assert!(contents.contains("default_category = \"Work\""));

    let entry = sandbox.json(&["add", "--json", "-m", "Standup"]);
    assert_eq!(entry["categories"], serde_json::json!(["Work"]));

    let again = sandbox.run(&["init", "--no-input"]);
    assert_eq!(again.status.code(), Some(4));
    sandbox.ok(&["init", "--no-input", "--force"]);
}

#[test]
fn test_cli_entries_survive_between_runs_on_disk() {
    let sandbox = Sandbox::new();
    sandbox.add("2024-03-01", "Persisted", "4");
    let raw = std::fs::read_to_string(sandbox.data_dir().join("journalEntries.json")).unwrap();
    let mapping: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(mapping["2024-03-01"][0]["description"], "Persisted");
    assert_eq!(mapping["2024-03-01"][0]["dateKey"], "2024-03-01");
}

#[test]
fn test_cli_no_command_prints_quickstart() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.ok(&[]);
    assert!(stdout.contains("Quickstart"));
    assert!(stdout.contains("daybook add"));
}
