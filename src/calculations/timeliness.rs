use crate::dates::days_between;
use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How an actual delivery landed against its baseline deliver date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTimeliness {
    Early,
    OnTime,
    Late,
}

impl DeliveryTimeliness {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryTimeliness::Early => "early",
            DeliveryTimeliness::OnTime => "on_time",
            DeliveryTimeliness::Late => "late",
        }
    }
}

impl fmt::Display for DeliveryTimeliness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a delivered task against its CR (or forecast) deliver date.
///
/// Returns `None` until the task has an actual deliver date, and when there
/// is no baseline to compare against.
pub fn delivery_timeliness(task: &Task) -> Option<DeliveryTimeliness> {
    let actual = task.actual_deliver()?;
    let baseline = task.baseline_deliver()?;
    let diff = days_between(Some(baseline), Some(actual))?;
    Some(match diff.cmp(&0) {
        Ordering::Less => DeliveryTimeliness::Early,
        Ordering::Equal => DeliveryTimeliness::OnTime,
        Ordering::Greater => DeliveryTimeliness::Late,
    })
}
