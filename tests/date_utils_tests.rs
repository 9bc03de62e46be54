use chrono::NaiveDate;
use milestone_kpi::dates::format_date;
use milestone_kpi::{Clock, FixedClock, days_between, parse_date};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parse_date_accepts_iso_dates() {
    assert_eq!(parse_date("2024-03-01"), Some(d(2024, 3, 1)));
    assert_eq!(parse_date("  2024-02-29 "), Some(d(2024, 2, 29)));
}

#[test]
fn parse_date_collapses_empty_and_malformed_to_none() {
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("   "), None);
    assert_eq!(parse_date("not a date"), None);
    assert_eq!(parse_date("2024-13-01"), None);
    assert_eq!(parse_date("2023-02-29"), None);
}

#[test]
fn days_between_is_signed_and_propagates_absence() {
    assert_eq!(days_between(Some(d(2024, 1, 1)), Some(d(2024, 1, 10))), Some(9));
    assert_eq!(days_between(Some(d(2024, 1, 10)), Some(d(2024, 1, 1))), Some(-9));
    assert_eq!(days_between(Some(d(2024, 2, 28)), Some(d(2024, 3, 1))), Some(2));
    assert_eq!(days_between(None, Some(d(2024, 1, 1))), None);
    assert_eq!(days_between(Some(d(2024, 1, 1)), None), None);
}

#[test]
fn fixed_clock_pins_today() {
    let clock = FixedClock::new(d(2024, 1, 15));
    assert_eq!(clock.today(), d(2024, 1, 15));
    let by_ref: &dyn Clock = &clock;
    assert_eq!(by_ref.today(), d(2024, 1, 15));

    assert_eq!(FixedClock::parse("2024-01-15"), Some(clock));
    assert_eq!(FixedClock::parse("15/01/2024"), None);
}

#[test]
fn format_date_writes_iso_or_empty() {
    assert_eq!(format_date(Some(d(2024, 7, 4))), "2024-07-04");
    assert_eq!(format_date(None), "");
}
