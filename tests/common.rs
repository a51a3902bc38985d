#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Days, NaiveDate, NaiveTime};
use gymstats::db::initialize::init_db;
use gymstats::db::queries::{insert_event, insert_holiday, insert_member};
use gymstats::models::attendance::AttendanceEvent;
use gymstats::models::gender::Gender;
use gymstats::models::member::Member;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Evaluation date used by every fixture.
pub const NOW: &str = "2025-10-18";

pub fn now() -> NaiveDate {
    NaiveDate::parse_from_str(NOW, "%Y-%m-%d").unwrap()
}

/// The binary, with HOME pointed at a scratch dir so a real config is never read.
pub fn gs() -> Command {
    let mut home: PathBuf = env::temp_dir();
    home.push("gymstats_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("gymstats");
    cmd.env("HOME", &home).env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_gymstats.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a temp file and return its path.
pub fn temp_csv(name: &str, content: &str) -> String {
    let p = temp_out(name, "csv");
    fs::write(&p, content).unwrap();
    p
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn visit(id: &str, days_ago: u64, hh: u32, mm: u32) -> AttendanceEvent {
    AttendanceEvent::new(
        id,
        now().checked_sub_days(Days::new(days_ago)).unwrap(),
        NaiveTime::from_hms_opt(hh, mm, 0).unwrap(),
    )
}

/// Initialize the DB through the CLI and load a small gym through the library:
///
/// - `m01` regular, visits every other day → none
/// - `f01` last visit 8 days ago → caution
/// - `m02` never visited → danger
/// - `f02` membership ended yesterday → none (expired)
/// - `m03` 3/week habit collapsed to one visit in two weeks → warning
/// - `zz`  a check-in with no member record
pub fn init_db_with_data(db_path: &str) {
    gs().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    let conn = rusqlite::Connection::open(db_path).expect("open db");
    init_db(&conn).expect("init db");

    let start = d(2025, 1, 1);
    let members = [
        Member::new("m01", Some(Gender::Male), start),
        Member::new("f01", Some(Gender::Female), start),
        Member::new("m02", Some(Gender::Male), start),
        Member::new("f02", Some(Gender::Female), start).with_end(Some(d(2025, 10, 17))),
        Member::new("m03", Some(Gender::Male), start),
    ];
    for m in &members {
        insert_member(&conn, m).expect("insert member");
    }

    let mut events = Vec::new();
    for ago in [0, 2, 4, 6, 9, 11] {
        events.push(visit("m01", ago, 7, 30));
    }
    for ago in [8, 12] {
        events.push(visit("f01", ago, 18, 10));
    }
    for ago in [3, 16, 17, 18, 19, 21, 23, 25, 27, 29, 31, 33, 35] {
        events.push(visit("m03", ago, 19, 0));
    }
    events.push(visit("f02", 17, 7, 5));
    events.push(visit("zz", 0, 9, 0));

    for ev in &events {
        insert_event(&conn, ev).expect("insert event");
    }

    insert_holiday(&conn, d(2025, 10, 3), Some("kr-2025")).expect("insert holiday");
    insert_holiday(&conn, d(2025, 10, 9), Some("kr-2025")).expect("insert holiday");
}
