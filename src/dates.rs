//! Calendar-date helpers shared by every metric.
//!
//! Dates arrive from the store as `yyyy-mm-dd` strings. Empty and malformed
//! strings both collapse to `None`; nothing in here returns an error.

use chrono::{Local, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date, returning `None` for empty or malformed input.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

/// Whole-day difference `b - a`, or `None` when either side is absent.
pub fn days_between(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<i64> {
    match (a, b) {
        (Some(a), Some(b)) => Some((b - a).num_days()),
        _ => None,
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Source of "today" for every derivation.
///
/// Metrics never read the wall clock directly; callers hand in a clock so
/// that evaluation can be pinned to a fixed day.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar day of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self(today)
    }

    /// Build from an ISO string; `None` when the string is not a date.
    pub fn parse(input: &str) -> Option<Self> {
        parse_date(input).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
