use super::gender::Gender;
use serde::Serialize;

/// Aggregate of events falling into one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub total: u32,
    pub male: u32,
    pub female: u32,
}

impl Bucket {
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            total: 0,
            male: 0,
            female: 0,
        }
    }

    /// Count one event. Unknown gender only bumps the total.
    pub fn record(&mut self, gender: Option<Gender>) {
        self.total += 1;
        match gender {
            Some(Gender::Male) => self.male += 1,
            Some(Gender::Female) => self.female += 1,
            None => {}
        }
    }
}
