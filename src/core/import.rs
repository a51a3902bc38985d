//! CSV import into the snapshot store.
//!
//! Expected headers:
//! - members:  `id,gender,registration_date,membership_start,membership_end`
//! - events:   `member_id,date,time,slot_type,slot_id`
//! - holidays: `date,version`
//!
//! Empty optional cells are treated as missing. A whole import runs in one
//! transaction: any malformed row aborts it and nothing is written.

use crate::db::queries::{insert_event, insert_holiday, insert_member};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceEvent;
use crate::models::gender::Gender;
use crate::models::member::Member;
use crate::models::slot_type::SlotType;
use crate::utils::date::parse_date;
use crate::utils::time::parse_time;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct MemberRecord {
    id: String,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    registration_date: Option<String>,
    membership_start: String,
    #[serde(default)]
    membership_end: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    member_id: String,
    date: String,
    time: String,
    #[serde(default)]
    slot_type: Option<String>,
    #[serde(default)]
    slot_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HolidayRecord {
    date: String,
    #[serde(default)]
    version: Option<String>,
}

/// What one import run wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub members: usize,
    pub events: usize,
    pub duplicate_events: usize,
    pub holidays: usize,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn required_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s.trim()).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

impl MemberRecord {
    fn into_member(self) -> AppResult<Member> {
        let gender = match non_empty(self.gender) {
            Some(code) => {
                Some(Gender::from_code(&code).ok_or(AppError::InvalidGender(code))?)
            }
            None => None,
        };

        let start = required_date(&self.membership_start)?;
        let registration = match non_empty(self.registration_date) {
            Some(s) => required_date(&s)?,
            None => start,
        };
        let end = match non_empty(self.membership_end) {
            Some(s) => Some(required_date(&s)?),
            None => None,
        };

        Ok(Member {
            id: self.id.trim().to_string(),
            gender,
            registration_date: registration,
            membership_start: start,
            membership_end: end,
        })
    }
}

impl EventRecord {
    fn into_event(self) -> AppResult<AttendanceEvent> {
        let date = required_date(&self.date)?;
        let time = parse_time(self.time.trim()).ok_or(AppError::InvalidTime(self.time))?;

        let slot_type = match non_empty(self.slot_type) {
            Some(code) => Some(
                SlotType::from_code(&code)
                    .ok_or_else(|| AppError::Other(format!("Invalid slot type: {code}")))?,
            ),
            None => None,
        };

        Ok(AttendanceEvent::new(self.member_id.trim(), date, time)
            .with_slot(slot_type, non_empty(self.slot_id)))
    }
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn read_members<R: Read>(reader: R) -> AppResult<Vec<Member>> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        rdr.deserialize::<MemberRecord>()
            .map(|r| r?.into_member())
            .collect()
    }

    pub fn read_events<R: Read>(reader: R) -> AppResult<Vec<AttendanceEvent>> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        rdr.deserialize::<EventRecord>()
            .map(|r| r?.into_event())
            .collect()
    }

    pub fn read_holidays<R: Read>(reader: R) -> AppResult<Vec<(NaiveDate, Option<String>)>> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        rdr.deserialize::<HolidayRecord>()
            .map(|r| {
                let rec = r?;
                Ok((required_date(&rec.date)?, non_empty(rec.version)))
            })
            .collect()
    }

    /// Read the given CSV files and store their rows in a single transaction.
    pub fn import_files(
        conn: &mut Connection,
        members: Option<&Path>,
        events: Option<&Path>,
        holidays: Option<&Path>,
    ) -> AppResult<ImportReport> {
        // 1) Parse everything first so a bad file never leaves a partial import
        let members = match members {
            Some(p) => Self::read_members(std::fs::File::open(p)?)?,
            None => Vec::new(),
        };
        let events = match events {
            Some(p) => Self::read_events(std::fs::File::open(p)?)?,
            None => Vec::new(),
        };
        let holidays = match holidays {
            Some(p) => Self::read_holidays(std::fs::File::open(p)?)?,
            None => Vec::new(),
        };

        // 2) Write
        Self::store(conn, &members, &events, &holidays)
    }

    pub fn store(
        conn: &mut Connection,
        members: &[Member],
        events: &[AttendanceEvent],
        holidays: &[(NaiveDate, Option<String>)],
    ) -> AppResult<ImportReport> {
        let tx = conn.transaction()?;
        let mut report = ImportReport::default();

        for m in members {
            insert_member(&tx, m)?;
            report.members += 1;
        }

        for ev in events {
            if insert_event(&tx, ev)? {
                report.events += 1;
            } else {
                report.duplicate_events += 1;
            }
        }

        for (date, version) in holidays {
            insert_holiday(&tx, *date, version.as_deref())?;
            report.holidays += 1;
        }

        tx.commit()?;

        if report.duplicate_events > 0 {
            warn!(duplicates = report.duplicate_events, "duplicate check-ins skipped");
        }
        debug!(?report, "import committed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::{load_events, load_members};

    const MEMBERS: &str = "\
id,gender,registration_date,membership_start,membership_end
u1,남,2025-01-02,2025-01-02,
u2,F,,2025-02-01,2025-12-31
u3,,2025-03-01,2025-03-01,
";

    const EVENTS: &str = "\
member_id,date,time,slot_type,slot_id
u1,2025-10-01,07:15,machine,M-1
u1,2025-10-01,07:15,machine,M-1
u2,2025-10-02,18:40,,
";

    #[test]
    fn members_csv_accepts_korean_codes_and_blank_cells() {
        let members = ImportLogic::read_members(MEMBERS.as_bytes()).unwrap();
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].gender, Some(Gender::Male));
        assert_eq!(members[1].registration_date, members[1].membership_start);
        assert!(members[1].membership_end.is_some());
        assert_eq!(members[2].gender, None);
        assert_eq!(members[2].membership_end, None);
    }

    #[test]
    fn bad_gender_is_reported() {
        let csv = "id,gender,registration_date,membership_start,membership_end\nx,?,,2025-01-01,\n";
        assert!(matches!(
            ImportLogic::read_members(csv.as_bytes()),
            Err(AppError::InvalidGender(_))
        ));
    }

    #[test]
    fn store_counts_duplicates_and_commits() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        let members = ImportLogic::read_members(MEMBERS.as_bytes()).unwrap();
        let events = ImportLogic::read_events(EVENTS.as_bytes()).unwrap();
        let report = ImportLogic::store(&mut conn, &members, &events, &[]).unwrap();

        assert_eq!(report.members, 3);
        assert_eq!(report.events, 2);
        assert_eq!(report.duplicate_events, 1);
        assert_eq!(load_members(&conn).unwrap().len(), 3);
        assert_eq!(load_events(&conn, None).unwrap()[0].slot_type, Some(SlotType::Machine));
    }

    #[test]
    fn malformed_time_aborts_the_whole_file() {
        let csv = "member_id,date,time,slot_type,slot_id\nu1,2025-10-01,7h,,\n";
        assert!(matches!(
            ImportLogic::read_events(csv.as_bytes()),
            Err(AppError::InvalidTime(_))
        ));
    }
}
