use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceEvent;
use crate::models::gender::Gender;
use crate::models::holiday::HolidaySet;
use crate::models::member::Member;
use crate::models::slot_type::SlotType;
use crate::models::snapshot::Snapshot;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, Result, Row, params};
use tracing::debug;

// ------------------------------------------------------------
// Row conversion helpers
// ------------------------------------------------------------

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date_col(row: &Row, col: &str) -> Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

fn parse_opt_date_col(row: &Row, col: &str) -> Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(col)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| conversion_error(0, AppError::InvalidDate(s.to_string()))),
    }
}

pub fn map_member(row: &Row) -> Result<Member> {
    let gender_str: Option<String> = row.get("gender")?;
    let gender = match gender_str.as_deref() {
        None => None,
        Some(s) => Some(Gender::from_db_str(s).ok_or_else(|| {
            conversion_error(1, AppError::InvalidGender(s.to_string()))
        })?),
    };

    Ok(Member {
        id: row.get("id")?,
        gender,
        registration_date: parse_date_col(row, "registration_date")?,
        membership_start: parse_date_col(row, "membership_start")?,
        membership_end: parse_opt_date_col(row, "membership_end")?,
    })
}

pub fn map_event(row: &Row) -> Result<AttendanceEvent> {
    let time_str: String = row.get("time")?;
    let time = NaiveTime::parse_from_str(&time_str, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&time_str, "%H:%M:%S"))
        .map_err(|_| conversion_error(3, AppError::InvalidTime(time_str.clone())))?;

    let slot_type: Option<String> = row.get("slot_type")?;

    Ok(AttendanceEvent {
        member_id: row.get("member_id")?,
        date: parse_date_col(row, "date")?,
        time,
        slot_type: slot_type.as_deref().and_then(SlotType::from_db_str),
        slot_id: row.get("slot_id")?,
    })
}

// ------------------------------------------------------------
// Writers
// ------------------------------------------------------------

/// Insert or replace a member record.
pub fn insert_member(conn: &Connection, m: &Member) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO members (id, gender, registration_date, membership_start, membership_end)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            m.id,
            m.gender.map(|g| g.to_db_str()),
            m.registration_date.format("%Y-%m-%d").to_string(),
            m.membership_start.format("%Y-%m-%d").to_string(),
            m.membership_end.map(|d| d.format("%Y-%m-%d").to_string()),
        ],
    )?;
    Ok(())
}

/// Insert a check-in. Returns `false` when the same member already checked
/// in at that exact date and time.
pub fn insert_event(conn: &Connection, ev: &AttendanceEvent) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO attendance (member_id, date, time, slot_type, slot_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.member_id,
            ev.date_str(),
            ev.time_str(),
            ev.slot_type.map(|s| s.to_db_str()),
            ev.slot_id,
        ],
    )?;
    Ok(changed == 1)
}

pub fn insert_holiday(conn: &Connection, date: NaiveDate, version: Option<&str>) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO holidays (date, version) VALUES (?1, ?2)",
        params![date.format("%Y-%m-%d").to_string(), version],
    )?;
    Ok(())
}

// ------------------------------------------------------------
// Bulk loaders
// ------------------------------------------------------------

pub fn load_members(conn: &Connection) -> AppResult<Vec<Member>> {
    let mut stmt = conn.prepare(
        "SELECT id, gender, registration_date, membership_start, membership_end
         FROM members
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], map_member)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Load check-ins ordered by date and time, optionally restricted to an
/// inclusive date range.
pub fn load_events(
    conn: &Connection,
    range: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<AttendanceEvent>> {
    let (from, to) = match range {
        Some((from, to)) => (
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string(),
        ),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT member_id, date, time, slot_type, slot_id
         FROM attendance
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, time ASC, member_id ASC",
    )?;

    let rows = stmt.query_map(params![from, to], map_event)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Load the holiday calendar. The version label is the most recent one stored.
pub fn load_holidays(conn: &Connection) -> AppResult<HolidaySet> {
    let mut stmt = conn.prepare("SELECT date FROM holidays ORDER BY date ASC")?;
    let rows = stmt.query_map([], |row| parse_date_col(row, "date"))?;

    let mut set = HolidaySet::new();
    for r in rows {
        set.insert(r?);
    }

    let version: Option<String> = conn.query_row(
        "SELECT MAX(version) FROM holidays WHERE version IS NOT NULL",
        [],
        |row| row.get(0),
    )?;

    if let Some(v) = version {
        set = set.with_version(v);
    }
    Ok(set)
}

/// Load members, all check-ins and holidays in one go.
pub fn load_snapshot(conn: &Connection) -> AppResult<Snapshot> {
    let snapshot = Snapshot::new(
        load_members(conn)?,
        load_events(conn, None)?,
        load_holidays(conn)?,
    );

    debug!(
        members = snapshot.members.len(),
        events = snapshot.events.len(),
        holidays = snapshot.holidays.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    #[test]
    fn members_round_trip_with_optional_fields() {
        let conn = setup();
        let open = Member::new("m2", None, d(2025, 3, 1));
        let closed = Member::new("m1", Some(Gender::Female), d(2025, 1, 1))
            .with_end(Some(d(2025, 6, 30)));
        insert_member(&conn, &open).unwrap();
        insert_member(&conn, &closed).unwrap();

        let loaded = load_members(&conn).unwrap();
        assert_eq!(loaded, vec![closed, open]);
    }

    #[test]
    fn duplicate_check_in_is_ignored() {
        let conn = setup();
        let ev = AttendanceEvent::new("m1", d(2025, 10, 1), t(7, 30))
            .with_slot(Some(SlotType::Machine), Some("A-3".into()));

        assert!(insert_event(&conn, &ev).unwrap());
        assert!(!insert_event(&conn, &ev).unwrap());

        let loaded = load_events(&conn, None).unwrap();
        assert_eq!(loaded, vec![ev]);
    }

    #[test]
    fn events_are_filtered_by_inclusive_range() {
        let conn = setup();
        for day in [1, 5, 10] {
            insert_event(&conn, &AttendanceEvent::new("m1", d(2025, 10, day), t(9, 0))).unwrap();
        }

        let loaded = load_events(&conn, Some((d(2025, 10, 5), d(2025, 10, 10)))).unwrap();
        let days: Vec<NaiveDate> = loaded.iter().map(|e| e.date).collect();
        assert_eq!(days, vec![d(2025, 10, 5), d(2025, 10, 10)]);
    }

    #[test]
    fn snapshot_carries_holiday_version() {
        let conn = setup();
        insert_holiday(&conn, d(2025, 10, 3), Some("kr-2025")).unwrap();
        insert_holiday(&conn, d(2025, 10, 9), Some("kr-2025")).unwrap();

        let snap = load_snapshot(&conn).unwrap();
        assert_eq!(snap.holidays.len(), 2);
        assert!(snap.holidays.contains(&d(2025, 10, 9)));
        assert_eq!(snap.holidays.version.as_deref(), Some("kr-2025"));
        assert!(snap.members.is_empty());
    }
}
