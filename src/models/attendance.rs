use super::slot_type::SlotType;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

/// A single check-in. Immutable once recorded; several per member and day
/// are allowed as long as the times differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceEvent {
    pub member_id: String,            // ⇔ attendance.member_id
    pub date: NaiveDate,              // ⇔ attendance.date (TEXT "YYYY-MM-DD")
    pub time: NaiveTime,              // ⇔ attendance.time (TEXT "HH:MM")
    pub slot_type: Option<SlotType>,  // ⇔ attendance.slot_type
    pub slot_id: Option<String>,      // ⇔ attendance.slot_id
}

impl AttendanceEvent {
    pub fn new(member_id: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            member_id: member_id.into(),
            date,
            time,
            slot_type: None,
            slot_id: None,
        }
    }

    pub fn with_slot(mut self, slot_type: Option<SlotType>, slot_id: Option<String>) -> Self {
        self.slot_type = slot_type;
        self.slot_id = slot_id;
        self
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Time truncated to the hour.
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }
}
