use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Dates excluded from business-day counts.
///
/// The set is supplied by the caller (usually loaded from the `holidays`
/// table) and may carry a version label so reports can state which calendar
/// they were computed against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    pub version: Option<String>,
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            version: None,
            dates: dates.into_iter().collect(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}
