use chrono::{Datelike, Days, NaiveDate};
use gymstats::core::aggregate::{BucketSpec, HourWindow, StatsView, aggregate};
use gymstats::core::calendar::{days_in_month, month_weeks};
use gymstats::core::logic::Core;
use gymstats::core::risk::{RiskRules, at_risk};
use gymstats::db::queries::load_snapshot;
use gymstats::models::holiday::HolidaySet;
use gymstats::models::period::MonthKey;
use gymstats::models::risk::{Recency, RiskLevel};

mod common;
use common::{init_db_with_data, now, setup_test_db};

fn snapshot(name: &str) -> gymstats::models::snapshot::Snapshot {
    let db_path = setup_test_db(name);
    init_db_with_data(&db_path);
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    load_snapshot(&conn).unwrap()
}

#[test]
fn every_month_is_partitioned_without_gaps() {
    let holidays = HolidaySet::from_dates([NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()]);

    for year in 2024..=2026 {
        for month in 1..=12 {
            let weeks = month_weeks(year, month, &holidays).unwrap();
            let covered: u32 = weeks.iter().map(|w| w.days()).sum();
            assert_eq!(covered, days_in_month(year, month).unwrap());

            for pair in weeks.windows(2) {
                assert_eq!(pair[0].end.succ_opt().unwrap(), pair[1].start);
            }
            for w in &weeks {
                assert!(w.business_days <= w.days());
                assert_eq!(w.start.month(), month);
                assert_eq!(w.end.month(), month);
            }
        }
    }
}

#[test]
fn holidays_from_the_store_reduce_business_days() {
    let snap = snapshot("engine_holidays");
    let rows = Core::week_table(&snap, MonthKey::new(2025, 10).unwrap()).unwrap();

    // Oct 1-4 2025: Wed, Thu, Fri (holiday), Sat
    assert_eq!(rows[0].business_days, 2);
    // Oct 5-11: Mon-Fri minus the 9th
    assert_eq!(rows[1].business_days, 4);
}

#[test]
fn gender_split_never_exceeds_total_and_aggregation_is_repeatable() {
    let snap = snapshot("engine_buckets");

    for view in [
        StatsView::Hourly,
        StatsView::Daily,
        StatsView::Weekly,
        StatsView::Monthly,
        StatsView::Last7,
    ] {
        let spec = BucketSpec::for_view(
            view,
            now(),
            MonthKey::of(now()),
            &snap.holidays,
            HourWindow::default(),
        )
        .unwrap();

        let first = aggregate(&snap.events, &snap.members, &spec).unwrap();
        let second = aggregate(&snap.events, &snap.members, &spec).unwrap();
        assert_eq!(first, second);

        for b in &first {
            assert!(b.male + b.female <= b.total, "{view:?} {}", b.label);
        }
    }
}

#[test]
fn verdicts_over_the_stored_snapshot() {
    let snap = snapshot("engine_verdicts");
    let verdicts = Core::verdicts(&snap, &RiskRules::default(), now()).unwrap();

    assert_eq!(verdicts.len(), snap.members.len());

    let level_of = |id: &str| {
        verdicts
            .iter()
            .find(|v| v.member_id == id)
            .map(|v| v.level)
            .unwrap()
    };
    assert_eq!(level_of("m01"), RiskLevel::None);
    assert_eq!(level_of("f01"), RiskLevel::Caution);
    assert_eq!(level_of("m02"), RiskLevel::Danger);
    assert_eq!(level_of("f02"), RiskLevel::None);
    assert_eq!(level_of("m03"), RiskLevel::Warning);

    let ranked = at_risk(&verdicts);
    assert_eq!(ranked[0].member_id, "m02");
    assert_eq!(ranked[0].days_since_visit, Recency::Never);
}

#[test]
fn later_now_turns_caution_into_danger() {
    let snap = snapshot("engine_later_now");
    let later = now().checked_add_days(Days::new(6)).unwrap();

    let verdicts = Core::verdicts(&snap, &RiskRules::default(), later).unwrap();
    let f01 = verdicts.iter().find(|v| v.member_id == "f01").unwrap();
    assert_eq!(f01.level, RiskLevel::Danger);
    assert_eq!(f01.days_since_visit, Recency::Days(14));
}
