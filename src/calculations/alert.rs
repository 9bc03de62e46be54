use crate::task::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Overdue,
    DueSoon,
    NotStarted,
    CrActive,
}

impl AlertType {
    pub const ALL: [AlertType; 4] = [
        AlertType::Overdue,
        AlertType::DueSoon,
        AlertType::NotStarted,
        AlertType::CrActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Overdue => "overdue",
            AlertType::DueSoon => "due_soon",
            AlertType::NotStarted => "not_started",
            AlertType::CrActive => "cr_active",
        }
    }

    /// Position in the alert list; lower ranks sort first.
    pub fn severity_rank(&self) -> u8 {
        match self {
            AlertType::Overdue => 0,
            AlertType::DueSoon => 1,
            AlertType::NotStarted => 2,
            AlertType::CrActive => 3,
        }
    }
}

impl Ord for AlertType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity_rank().cmp(&other.severity_rank())
    }
}

impl PartialOrd for AlertType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one task into at most one alert. The first matching rule wins:
///
/// 1. done or cancelled tasks never alert
/// 2. any CR start or CR deliver date marks the task `CrActive`, even when
///    its deliver date has already passed
/// 3. undelivered past the baseline deliver date is `Overdue`
/// 4. undelivered with the deliver date within `alert_days_window` days is `DueSoon`
/// 5. not actually started past the baseline start date is `NotStarted`
pub fn task_alert(task: &Task, alert_days_window: u32, today: NaiveDate) -> Option<AlertType> {
    if task.status.is_terminal() {
        return None;
    }

    if task.has_active_change_request() {
        return Some(AlertType::CrActive);
    }

    let undelivered = task.actual_deliver().is_none();
    if let Some(deliver) = task.baseline_deliver() {
        if undelivered {
            if today > deliver {
                return Some(AlertType::Overdue);
            }
            let days_until = (deliver - today).num_days();
            if (0..=i64::from(alert_days_window)).contains(&days_until) {
                return Some(AlertType::DueSoon);
            }
        }
    }

    if let Some(start) = task.baseline_start() {
        if task.actual_start().is_none() && today > start {
            return Some(AlertType::NotStarted);
        }
    }

    None
}
