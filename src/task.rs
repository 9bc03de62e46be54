use crate::dates::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
    Blocked,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Blocked,
        TaskStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// Done and cancelled tasks are finished and never raise alerts.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| ParseEnumError::new("task status", s))
    }
}

/// Returned when a symbolic value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

/// JSON `null` in a text field reads as the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A milestone row as held by the store.
///
/// Date fields keep the raw `yyyy-mm-dd` text; an empty string means the
/// date has not been filled in. Use the accessor methods to get parsed dates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: String,
    pub seq: i32,
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub owner: String,
    pub status: TaskStatus,
    #[serde(deserialize_with = "null_as_empty")]
    pub forecast_start: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub forecast_deliver: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub forecast_end: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub actual_start: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub actual_deliver: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub actual_end: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub cr_start: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub cr_deliver: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub cr_end: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub cr_note: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub memo: String,
}

impl Task {
    pub fn new(id: impl Into<String>, seq: i32, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            seq,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_forecast(mut self, start: &str, deliver: &str, end: &str) -> Self {
        self.forecast_start = start.to_string();
        self.forecast_deliver = deliver.to_string();
        self.forecast_end = end.to_string();
        self
    }

    pub fn with_actual(mut self, start: &str, deliver: &str, end: &str) -> Self {
        self.actual_start = start.to_string();
        self.actual_deliver = deliver.to_string();
        self.actual_end = end.to_string();
        self
    }

    pub fn with_change_request(mut self, start: &str, deliver: &str, end: &str) -> Self {
        self.cr_start = start.to_string();
        self.cr_deliver = deliver.to_string();
        self.cr_end = end.to_string();
        self
    }

    pub fn forecast_start(&self) -> Option<NaiveDate> {
        parse_date(&self.forecast_start)
    }

    pub fn forecast_deliver(&self) -> Option<NaiveDate> {
        parse_date(&self.forecast_deliver)
    }

    pub fn forecast_end(&self) -> Option<NaiveDate> {
        parse_date(&self.forecast_end)
    }

    pub fn actual_start(&self) -> Option<NaiveDate> {
        parse_date(&self.actual_start)
    }

    pub fn actual_deliver(&self) -> Option<NaiveDate> {
        parse_date(&self.actual_deliver)
    }

    pub fn actual_end(&self) -> Option<NaiveDate> {
        parse_date(&self.actual_end)
    }

    pub fn cr_start(&self) -> Option<NaiveDate> {
        parse_date(&self.cr_start)
    }

    pub fn cr_deliver(&self) -> Option<NaiveDate> {
        parse_date(&self.cr_deliver)
    }

    pub fn cr_end(&self) -> Option<NaiveDate> {
        parse_date(&self.cr_end)
    }

    /// CR deliver date, falling back to the forecast deliver date.
    pub fn baseline_deliver(&self) -> Option<NaiveDate> {
        self.cr_deliver().or_else(|| self.forecast_deliver())
    }

    /// CR start date, falling back to the forecast start date.
    pub fn baseline_start(&self) -> Option<NaiveDate> {
        self.cr_start().or_else(|| self.forecast_start())
    }

    /// CR end date, falling back to the forecast end date.
    pub fn baseline_end(&self) -> Option<NaiveDate> {
        self.cr_end().or_else(|| self.forecast_end())
    }

    /// True when a change request has moved either the start or the deliver date.
    pub fn has_active_change_request(&self) -> bool {
        self.cr_start().is_some() || self.cr_deliver().is_some()
    }

    /// Every non-empty date field that does not parse, as `(field, raw)` pairs.
    pub fn malformed_dates(&self) -> Vec<(&'static str, &str)> {
        let fields: [(&'static str, &str); 9] = [
            ("forecast_start", self.forecast_start.as_str()),
            ("forecast_deliver", self.forecast_deliver.as_str()),
            ("forecast_end", self.forecast_end.as_str()),
            ("actual_start", self.actual_start.as_str()),
            ("actual_deliver", self.actual_deliver.as_str()),
            ("actual_end", self.actual_end.as_str()),
            ("cr_start", self.cr_start.as_str()),
            ("cr_deliver", self.cr_deliver.as_str()),
            ("cr_end", self.cr_end.as_str()),
        ];
        fields
            .into_iter()
            .filter(|(_, raw)| !raw.trim().is_empty() && parse_date(raw).is_none())
            .collect()
    }
}
