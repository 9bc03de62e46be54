//! Proportional layout of a single calendar year.
//!
//! Positions are percentages of the year's width, so a renderer can place
//! month columns and task bars without knowing its own pixel size.

use crate::project::{Project, ProjectCategory};
use crate::task::{Task, TaskStatus};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Narrowest bar width, in percent, so same-day segments stay visible.
pub const MIN_VISIBLE_WIDTH_PCT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineLayout {
    year: i32,
    range_start: NaiveDate,
    range_end: NaiveDate,
    total_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthColumn {
    pub month: u32,
    pub start: NaiveDate,
    pub days: u32,
    pub left_pct: f64,
    pub width_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub left_pct: f64,
    pub width_pct: f64,
}

impl Bar {
    pub fn right_pct(&self) -> f64 {
        self.left_pct + self.width_pct
    }
}

impl TimelineLayout {
    /// Layout for Jan 1 through Dec 31 of `year`; `None` outside chrono's range.
    pub fn for_year(year: i32) -> Option<Self> {
        let range_start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let range_end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self {
            year,
            range_start,
            range_end,
            total_days: (range_end - range_start).num_days() + 1,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn range_start(&self) -> NaiveDate {
        self.range_start
    }

    pub fn range_end(&self) -> NaiveDate {
        self.range_end
    }

    /// 365, or 366 in leap years.
    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    /// Offset of `date` from Jan 1 as a percentage of the year, clamped to `[0, 100]`.
    pub fn day_pct(&self, date: Option<NaiveDate>) -> Option<f64> {
        let date = date?;
        let offset = (date - self.range_start).num_days() as f64;
        let pct = offset / self.total_days as f64 * 100.0;
        Some(pct.clamp(0.0, 100.0))
    }

    pub fn today_pct(&self, today: NaiveDate) -> f64 {
        self.day_pct(Some(today)).unwrap_or_default()
    }

    /// Twelve columns whose widths partition the year.
    pub fn month_columns(&self) -> Vec<MonthColumn> {
        (1..=12)
            .filter_map(|month| {
                let start = NaiveDate::from_ymd_opt(self.year, month, 1)?;
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(self.year, month + 1, 1)?
                };
                let days = (next - start).num_days();
                Some(MonthColumn {
                    month,
                    start,
                    days: days as u32,
                    left_pct: self.day_pct(Some(start)).unwrap_or_default(),
                    width_pct: days as f64 / self.total_days as f64 * 100.0,
                })
            })
            .collect()
    }

    /// Place the segment `[start, end]`. An open segment (no `end`) runs to `today`.
    pub fn segment(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Option<Bar> {
        let left = self.day_pct(start)?;
        let right = self.day_pct(Some(end.unwrap_or(today)))?;
        Some(Bar {
            left_pct: left,
            width_pct: (right - left).max(MIN_VISIBLE_WIDTH_PCT),
        })
    }

    fn closed_segment(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Bar> {
        let end = end?;
        self.segment(start, Some(end), end)
    }

    pub fn task_bars(&self, task: &Task, today: NaiveDate) -> TaskBars {
        let forecast_deliver = task.forecast_deliver();
        let forecast_overdue = forecast_deliver
            .is_some_and(|deliver| task.actual_deliver().is_none() && today > deliver);
        let actual_finish = task.actual_deliver().or_else(|| task.actual_end());

        TaskBars {
            change_request: self.closed_segment(task.cr_start(), task.cr_deliver()),
            forecast: self.closed_segment(task.forecast_start(), forecast_deliver),
            forecast_overdue,
            actual: self.segment(task.actual_start(), actual_finish, today),
            actual_done: task.status == TaskStatus::Done,
        }
    }

    /// One row per project, each with its task rows.
    ///
    /// With an owner filter, only that owner's tasks are kept and projects
    /// left without tasks are dropped.
    pub fn rows(
        &self,
        projects: &[Project],
        owner: Option<&str>,
        today: NaiveDate,
    ) -> Vec<TimelineRow> {
        projects
            .iter()
            .filter_map(|project| {
                let tasks: Vec<TaskRow> = project
                    .tasks
                    .iter()
                    .filter(|task| owner.is_none_or(|o| task.owner == o))
                    .map(|task| TaskRow {
                        task_id: task.id.clone(),
                        seq: task.seq,
                        name: task.name.clone(),
                        owner: task.owner.clone(),
                        bars: self.task_bars(task, today),
                    })
                    .collect();
                if owner.is_some() && tasks.is_empty() {
                    return None;
                }
                Some(TimelineRow {
                    project_id: project.id.clone(),
                    project_name: project.name.clone(),
                    category: project.category,
                    tasks,
                })
            })
            .collect()
    }
}

/// Bars drawn for one task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBars {
    /// CR start to CR deliver.
    pub change_request: Option<Bar>,
    /// Forecast start to forecast deliver.
    pub forecast: Option<Bar>,
    pub forecast_overdue: bool,
    /// Actual start to actual deliver (or end); open-ended tasks run to today.
    pub actual: Option<Bar>,
    pub actual_done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub task_id: String,
    pub seq: i32,
    pub name: String,
    pub owner: String,
    pub bars: TaskBars,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub project_id: String,
    pub project_name: String,
    pub category: ProjectCategory,
    pub tasks: Vec<TaskRow>,
}

/// Distinct non-empty owners in first-seen order.
pub fn owners(projects: &[Project]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for task in projects.iter().flat_map(|p| p.tasks.iter()) {
        let owner = task.owner.as_str();
        if !owner.is_empty() && !seen.contains(&owner) {
            seen.push(owner);
        }
    }
    seen
}

/// Year of `date`, for building the layout around "today".
pub fn layout_for(date: NaiveDate) -> Option<TimelineLayout> {
    TimelineLayout::for_year(date.year())
}
