use super::gender::Gender;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Member record as read from the store. The engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: String,
    pub gender: Option<Gender>,
    pub registration_date: NaiveDate,
    pub membership_start: NaiveDate,
    /// `None` for open-ended memberships, which never expire.
    pub membership_end: Option<NaiveDate>,
}

impl Member {
    pub fn new(id: impl Into<String>, gender: Option<Gender>, start: NaiveDate) -> Self {
        Self {
            id: id.into(),
            gender,
            registration_date: start,
            membership_start: start,
            membership_end: None,
        }
    }

    pub fn with_end(mut self, end: Option<NaiveDate>) -> Self {
        self.membership_end = end;
        self
    }

    /// Expired means the end date is strictly before `now`.
    pub fn is_expired(&self, now: NaiveDate) -> bool {
        matches!(self.membership_end, Some(end) if end < now)
    }
}

/// Lookup table from member id to member, built once per engine call.
pub struct MemberIndex<'a> {
    by_id: HashMap<&'a str, &'a Member>,
}

impl<'a> MemberIndex<'a> {
    pub fn new(members: &'a [Member]) -> Self {
        let by_id = members.iter().map(|m| (m.id.as_str(), m)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Member> {
        self.by_id.get(id).copied()
    }

    /// Gender of the member, `None` when the member is unknown or has no gender.
    pub fn gender_of(&self, id: &str) -> Option<Gender> {
        self.get(id).and_then(|m| m.gender)
    }
}
