use super::attendance::AttendanceEvent;
use super::holiday::HolidaySet;
use super::member::Member;

/// Everything the engine reads, loaded once per command.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub events: Vec<AttendanceEvent>,
    pub holidays: HolidaySet,
}

impl Snapshot {
    pub fn new(members: Vec<Member>, events: Vec<AttendanceEvent>, holidays: HolidaySet) -> Self {
        Self {
            members,
            events,
            holidays,
        }
    }
}
