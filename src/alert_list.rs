use crate::calculations::alert::{AlertType, task_alert};
use crate::project::Project;
use crate::task::Task;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// One alerting task, tagged with the project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert<'a> {
    pub project_id: &'a str,
    pub project_name: &'a str,
    pub task: &'a Task,
    pub alert_type: AlertType,
}

/// Alerts for every task of every project, most severe first.
///
/// The sort is stable, so alerts of equal severity keep project order and
/// then task order.
pub fn build_alert_list(
    projects: &[Project],
    alert_days_window: u32,
    today: NaiveDate,
) -> Vec<Alert<'_>> {
    let mut alerts: Vec<Alert<'_>> = projects
        .iter()
        .flat_map(|project| {
            project.tasks.iter().filter_map(move |task| {
                task_alert(task, alert_days_window, today).map(|alert_type| Alert {
                    project_id: &project.id,
                    project_name: &project.name,
                    task,
                    alert_type,
                })
            })
        })
        .collect();

    alerts.sort_by_key(|alert| alert.alert_type.severity_rank());
    debug!(
        "built {} alerts across {} projects (window={}d, today={})",
        alerts.len(),
        projects.len(),
        alert_days_window,
        today
    );
    alerts
}

/// The subset of an alert list that belongs to one project, order preserved.
pub fn alerts_for_project<'a, 'b>(
    alerts: &'b [Alert<'a>],
    project_id: &str,
) -> Vec<&'b Alert<'a>> {
    alerts
        .iter()
        .filter(|alert| alert.project_id == project_id)
        .collect()
}
