//! Time utilities: parsing check-in times.

use chrono::NaiveTime;

/// Parse `HH:MM`, also accepting `HH:MM:SS` as exported by the front desk.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_are_optional() {
        assert_eq!(parse_time("07:05"), NaiveTime::from_hms_opt(7, 5, 0));
        assert_eq!(parse_time("07:05:30"), NaiveTime::from_hms_opt(7, 5, 30));
        assert_eq!(parse_time("7h"), None);
    }
}
