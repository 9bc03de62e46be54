//! Project-level roll-ups of task state.

use crate::calculations::alert::{AlertType, task_alert};
use crate::dates::days_between;
use crate::project::{Project, ProjectStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Traffic-light health of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    Green,
    Yellow,
    Red,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Health::Green => "green",
            Health::Yellow => "yellow",
            Health::Red => "red",
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub total: usize,
    pub done: usize,
    pub pct: u32,
}

/// Red when any task is overdue, yellow when any is due soon or not started,
/// green otherwise. CR-active tasks do not affect health.
pub fn project_health(project: &Project, alert_days_window: u32, today: NaiveDate) -> Health {
    let mut health = Health::Green;
    for task in &project.tasks {
        match task_alert(task, alert_days_window, today) {
            Some(AlertType::Overdue) => return Health::Red,
            Some(AlertType::DueSoon) | Some(AlertType::NotStarted) => health = Health::Yellow,
            Some(AlertType::CrActive) | None => {}
        }
    }
    health
}

pub fn project_progress(project: &Project) -> Progress {
    let total = project.tasks.len();
    let done = project.done_count();
    Progress {
        total,
        done,
        pct: rounded_pct(done, total).unwrap_or(0),
    }
}

/// Earliest baseline deliver date on or after `today` among open tasks.
pub fn next_deadline(project: &Project, today: NaiveDate) -> Option<NaiveDate> {
    project
        .tasks
        .iter()
        .filter(|task| !task.status.is_terminal())
        .filter_map(|task| task.baseline_deliver())
        .filter(|deliver| *deliver >= today)
        .min()
}

/// Everything a project card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub project_id: String,
    pub health: Health,
    pub progress: Progress,
    pub next_deadline: Option<NaiveDate>,
    pub days_until_next_deadline: Option<i64>,
    pub overdue_count: usize,
    pub due_soon_count: usize,
}

pub fn project_overview(
    project: &Project,
    alert_days_window: u32,
    today: NaiveDate,
) -> ProjectOverview {
    let alerts: Vec<AlertType> = project
        .tasks
        .iter()
        .filter_map(|task| task_alert(task, alert_days_window, today))
        .collect();
    let next = next_deadline(project, today);
    ProjectOverview {
        project_id: project.id.clone(),
        health: project_health(project, alert_days_window, today),
        progress: project_progress(project),
        next_deadline: next,
        days_until_next_deadline: days_between(Some(today), next),
        overdue_count: count_of(&alerts, AlertType::Overdue),
        due_soon_count: count_of(&alerts, AlertType::DueSoon),
    }
}

/// Counters across the whole portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub active_projects: usize,
    pub total_tasks: usize,
    pub done_tasks: usize,
    /// `None` when the portfolio has no tasks at all.
    pub completion_pct: Option<u32>,
    pub overdue_count: usize,
    pub due_soon_count: usize,
}

pub fn portfolio_summary(
    projects: &[Project],
    alert_days_window: u32,
    today: NaiveDate,
) -> PortfolioSummary {
    let total_tasks: usize = projects.iter().map(|p| p.tasks.len()).sum();
    let done_tasks: usize = projects.iter().map(Project::done_count).sum();
    let alerts: Vec<AlertType> = projects
        .iter()
        .flat_map(|p| p.tasks.iter())
        .filter_map(|task| task_alert(task, alert_days_window, today))
        .collect();

    PortfolioSummary {
        active_projects: projects
            .iter()
            .filter(|p| p.status == ProjectStatus::InProgress)
            .count(),
        total_tasks,
        done_tasks,
        completion_pct: rounded_pct(done_tasks, total_tasks),
        overdue_count: count_of(&alerts, AlertType::Overdue),
        due_soon_count: count_of(&alerts, AlertType::DueSoon),
    }
}

fn rounded_pct(part: usize, total: usize) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some(((part as f64 / total as f64) * 100.0).round() as u32)
}

fn count_of(alerts: &[AlertType], kind: AlertType) -> usize {
    alerts.iter().filter(|a| **a == kind).count()
}
