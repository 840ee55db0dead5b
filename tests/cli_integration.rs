//! Integration tests for the `sb` CLI.
//!
//! Each test creates a temp project directory, runs `sb` as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `sb` binary.
fn sb_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("sb");
    path
}

/// Create a small project with one purchase-order dashboard in the given directory.
fn create_test_project(root: &Path) {
    let board_dir = root.join("boards");
    fs::create_dir_all(board_dir.join("data")).unwrap();

    fs::write(
        board_dir.join("project.toml"),
        r#"[project]
name = "test-project"

[board]
undo_timeout_ms = 5000

[[dashboards]]
id = "po"
name = "Purchase Orders"
file = "data/po.json"

[[dashboards.columns]]
id = 1
name = "Draft"

[[dashboards.columns]]
id = 2
name = "Approved"
color = "success"

[[dashboards.columns]]
id = 3
name = "Received"
color = "info"

[[dashboards]]
id = "fuel"
name = "Fuel Requests"
file = "data/fuel.json"

[[dashboards.columns]]
id = "pending"
name = "Pending"

[[dashboards.columns]]
id = "approved"
name = "Approved"
"#,
    )
    .unwrap();

    fs::write(
        board_dir.join("data/po.json"),
        r#"[
  {"id": 7, "title": "PO-0007", "status": 1, "supplier_name": "Acme Supplies", "total": 1250.5},
  {"id": 8, "title": "PO-0008", "status": 1},
  {"id": 9, "title": "PO-0009", "status": 3},
  {"id": 12, "title": "PO-0012", "status": 99}
]"#,
    )
    .unwrap();

    fs::write(
        board_dir.join("data/fuel.json"),
        r#"[{"id": "F-1", "title": "Truck 4", "status": "pending"}]"#,
    )
    .unwrap();
}

fn read_records(root: &Path, file: &str) -> serde_json::Value {
    let text = fs::read_to_string(root.join("boards").join(file)).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Run `sb` with the given args in the given directory, returning (stdout, stderr, success).
fn run_sb(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(sb_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run sb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `sb` expecting success, return stdout.
fn run_sb_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_sb(dir, args);
    if !success {
        panic!(
            "sb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_dashboards() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["dashboards"]);
    assert!(out.contains("po    Purchase Orders  Draft 2 \u{b7} Approved 0 \u{b7} Received 1"));
    assert!(out.contains("(1 without a column)"));
    assert!(out.contains("fuel  Fuel Requests  Pending 1 \u{b7} Approved 0"));
}

#[test]
fn test_dashboards_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["dashboards", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["id"], "po");
    assert_eq!(arr[0]["total"], 4);
    assert_eq!(arr[0]["columns"][0]["count"], 2);
    assert_eq!(arr[1]["columns"][0]["id"], "pending");
}

#[test]
fn test_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["list", "po"]);
    assert!(out.starts_with("== Purchase Orders =="));
    assert!(out.contains("Draft (2)"));
    assert!(out.contains("  #7  PO-0007  Acme Supplies"));
    assert!(out.contains("No column (1)"));
    assert!(out.contains("#12  PO-0012  [status 99]"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["list", "po", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["dashboard"], "po");
    assert_eq!(parsed["columns"][0]["items"][0]["id"], 7);
    assert_eq!(parsed["columns"][1]["color"], "success");
    assert_eq!(parsed["orphans"][0]["id"], 12);
}

#[test]
fn test_list_unknown_dashboard() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let (_stdout, stderr, success) = run_sb(tmp.path(), &["list", "nope"]);
    assert!(!success);
    assert!(stderr.contains("no dashboard \"nope\" (known: po, fuel)"));
}

#[test]
fn test_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["show", "po", "7"]);
    assert!(out.contains("status         Draft (1)"));
    assert!(out.contains("supplier_name  Acme Supplies"));
    assert!(out.contains("total          1250.5"));
}

#[test]
fn test_show_text_id_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["show", "fuel", "F-1", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], "F-1");
    assert_eq!(parsed["status"], "pending");
}

#[test]
fn test_show_not_found() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let (_stdout, stderr, success) = run_sb(tmp.path(), &["show", "po", "404"]);
    assert!(!success);
    assert!(stderr.contains("no record with id 404"));
}

#[test]
fn test_not_a_project() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_stdout, stderr, success) = run_sb(tmp.path(), &["dashboards"]);
    assert!(!success);
    assert!(stderr.contains("not a statusboard project"));
}

#[test]
fn test_project_dir_flag() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());
    let elsewhere = tempfile::TempDir::new().unwrap();

    let dir = tmp.path().to_str().unwrap();
    let out = run_sb_ok(elsewhere.path(), &["-C", dir, "list", "fuel"]);
    assert!(out.contains("#F-1  Truck 4"));
}

// ---------------------------------------------------------------------------
// Write command tests
// ---------------------------------------------------------------------------

#[test]
fn test_mv_commits_immediately() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["mv", "po", "7", "2"]);
    assert_eq!(out.trim(), "#7 PO-0007 -> Approved (position 0)");

    let records = read_records(tmp.path(), "data/po.json");
    assert_eq!(records[0]["id"], 7);
    assert_eq!(records[0]["status"], 2);
    // Untouched fields and file order survive the write
    assert_eq!(records[0]["supplier_name"], "Acme Supplies");
    assert_eq!(records[0]["total"], 1250.5);
    assert!(records[0]["updated_at"].is_string());
    assert_eq!(records[1]["status"], 1);
}

#[test]
fn test_mv_index_is_clamped() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["mv", "po", "8", "3", "--index", "10"]);
    assert_eq!(out.trim(), "#8 PO-0008 -> Received (position 1)");
}

#[test]
fn test_mv_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["mv", "fuel", "F-1", "approved", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["from_column_id"], "pending");
    assert_eq!(parsed["to_column_id"], "approved");
    assert_eq!(parsed["item"]["id"], "F-1");

    let records = read_records(tmp.path(), "data/fuel.json");
    assert_eq!(records[0]["status"], "approved");
}

#[test]
fn test_mv_same_column_is_noop() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());
    let before = fs::read_to_string(tmp.path().join("boards/data/po.json")).unwrap();

    let out = run_sb_ok(tmp.path(), &["mv", "po", "7", "1"]);
    assert!(out.contains("already in that column"));
    let after = fs::read_to_string(tmp.path().join("boards/data/po.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_mv_unknown_column() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let (_stdout, stderr, success) = run_sb(tmp.path(), &["mv", "po", "7", "42"]);
    assert!(!success);
    assert!(stderr.contains("column not found: 42"));
    let records = read_records(tmp.path(), "data/po.json");
    assert_eq!(records[0]["status"], 1);
}

#[test]
fn test_add() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["add", "po", "PO-0013"]);
    assert_eq!(out.trim(), "#13 PO-0013");

    let out = run_sb_ok(tmp.path(), &["add", "po", "PO-0014", "--status", "3", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], 14);
    assert_eq!(parsed["status"], 3);

    let records = read_records(tmp.path(), "data/po.json");
    let arr = records.as_array().unwrap();
    assert_eq!(arr.len(), 6);
    assert_eq!(arr[4]["status"], 1);
    assert!(arr[4]["created_at"].is_string());
}

#[test]
fn test_add_rejects_unknown_status() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let (_stdout, stderr, success) = run_sb(tmp.path(), &["add", "po", "X", "--status", "7"]);
    assert!(!success);
    assert!(stderr.contains("no column \"7\" on dashboard po"));
}

// ---------------------------------------------------------------------------
// Config tests
// ---------------------------------------------------------------------------

#[test]
fn test_config_shows_effective_values() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(tmp.path(), &["config"]);
    assert!(out.contains("column_width     28"));
    assert!(out.contains("undo_timeout_ms  5000"));
    assert!(out.contains("show_undo_toast  true"));
    assert!(out.contains("allow_reorder    false"));
}

#[test]
fn test_config_set_dashboard_override() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let out = run_sb_ok(
        tmp.path(),
        &["config", "set", "allow_reorder", "true", "--dashboard", "fuel"],
    );
    assert_eq!(out.trim(), "fuel.board.allow_reorder = true");

    let out = run_sb_ok(tmp.path(), &["config", "--dashboard", "fuel", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["allow_reorder"], true);
    assert_eq!(parsed["undo_timeout_ms"], 5000);

    // The global section is untouched
    let out = run_sb_ok(tmp.path(), &["config", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["allow_reorder"], false);

    // Comments and layout elsewhere in the file survive
    let toml = fs::read_to_string(tmp.path().join("boards/project.toml")).unwrap();
    assert!(toml.contains("name = \"Purchase Orders\""));
}

#[test]
fn test_config_set_rejects_bad_value() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let (_stdout, stderr, success) =
        run_sb(tmp.path(), &["config", "set", "undo_timeout_ms", "soon"]);
    assert!(!success);
    assert!(stderr.contains("invalid value \"soon\" for undo_timeout_ms"));

    let (_stdout, stderr, success) = run_sb(tmp.path(), &["config", "set", "color", "red"]);
    assert!(!success);
    assert!(stderr.contains("unknown board key \"color\""));
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_usable_project() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_sb_ok(tmp.path(), &["init", "--name", "Acme ERP"]);
    assert!(out.contains("Initialized statusboard project: Acme ERP"));
    assert!(tmp.path().join("boards/project.toml").exists());

    let out = run_sb_ok(tmp.path(), &["dashboards", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let ids: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"invoices"));
    assert!(ids.contains(&"purchase-orders"));

    let out = run_sb_ok(tmp.path(), &["add", "invoices", "INV-1"]);
    assert_eq!(out.trim(), "#1 INV-1");
}

#[test]
fn test_init_refuses_existing_project() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_project(tmp.path());

    let (_stdout, _stderr, success) = run_sb(tmp.path(), &["init"]);
    assert!(!success);
}
