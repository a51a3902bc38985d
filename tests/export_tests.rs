use predicates::str::contains;
use std::fs;

mod common;
use common::{NOW, gs, init_db_with_data, setup_test_db, temp_out};

#[test]
fn test_export_weekly_buckets_csv() {
    let db_path = setup_test_db("export_buckets_csv");
    let out = temp_out("export_buckets_csv", "csv");
    init_db_with_data(&db_path);

    gs().args([
        "--db", &db_path, "--now", NOW, "export", "buckets", "--view", "weekly", "--month",
        "2025-10", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("Buckets export completed (5 rows)"));

    let content = fs::read_to_string(&out).expect("read csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "view,label,total,male,female");
    assert_eq!(lines.len(), 6);
    // W1: m03 twice, f02 once
    assert_eq!(lines[1], "weekly,W1,3,2,1");
    // W3: m01 four times, m03 once, plus the unknown member
    assert_eq!(lines[3], "weekly,W3,6,5,0");
}

#[test]
fn test_export_verdicts_json() {
    let db_path = setup_test_db("export_verdicts_json");
    let out = temp_out("export_verdicts_json", "json");
    init_db_with_data(&db_path);

    gs().args([
        "--db", &db_path, "--now", NOW, "export", "verdicts", "--format", "json", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 5);

    let m02 = rows
        .iter()
        .find(|r| r["member_id"] == "m02")
        .expect("m02 exported");
    assert_eq!(m02["level"], "danger");
    assert!(m02["days_since_visit"].is_null());
    assert!(m02["last_visit"].is_null());

    let f02 = rows.iter().find(|r| r["member_id"] == "f02").unwrap();
    assert_eq!(f02["level"], "none");
    assert_eq!(f02["reason"], "expired membership");
    assert_eq!(f02["action"], "");
}

#[test]
fn test_export_daily_for_one_day() {
    let db_path = setup_test_db("export_daily");
    let out = temp_out("export_daily", "csv");
    init_db_with_data(&db_path);

    gs().args([
        "--db", &db_path, "--now", NOW, "export", "daily", "--range", "2025-10-18", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["date,total,unique_members", "2025-10-18,2,2"]);
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    gs().args([
        "--db", &db_path, "--now", NOW, "export", "verdicts", "--file", "out.csv",
    ])
    .assert()
    .failure()
    .stderr(contains("must be absolute"));
}

#[test]
fn test_export_force_overwrites() {
    let db_path = setup_test_db("export_force");
    let out = temp_out("export_force", "csv");
    init_db_with_data(&db_path);
    fs::write(&out, "stale").unwrap();

    gs().args([
        "--db", &db_path, "--now", NOW, "export", "verdicts", "--file", &out, "--force",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("member_id,level,reason,action,days_since_visit,last_visit"));
}
