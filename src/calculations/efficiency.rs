use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Actual working span compared with the baseline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortEfficiency {
    Shortened,
    Normal,
    Extended,
}

impl EffortEfficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffortEfficiency::Shortened => "shortened",
            EffortEfficiency::Normal => "normal",
            EffortEfficiency::Extended => "extended",
        }
    }
}

impl fmt::Display for EffortEfficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare `actual_end - actual_start` against `baseline_end - baseline_start`.
///
/// Baseline start and end fall back from CR to forecast independently, so a
/// task with only a CR start is measured against its forecast end. Spans are
/// not checked for end-before-start; negative spans are compared as they are.
pub fn effort_efficiency(task: &Task) -> Option<EffortEfficiency> {
    let actual_start = task.actual_start()?;
    let actual_end = task.actual_end()?;
    let baseline_start = task.baseline_start()?;
    let baseline_end = task.baseline_end()?;

    let actual_days = (actual_end - actual_start).num_days();
    let baseline_days = (baseline_end - baseline_start).num_days();

    Some(match (actual_days - baseline_days).cmp(&0) {
        Ordering::Less => EffortEfficiency::Shortened,
        Ordering::Equal => EffortEfficiency::Normal,
        Ordering::Greater => EffortEfficiency::Extended,
    })
}
