use crate::aggregate::{self, Health, PortfolioSummary, Progress, ProjectOverview};
use crate::alert_list::{self, Alert};
use crate::calculations::alert::{self, AlertType};
use crate::dates::{Clock, SystemClock};
use crate::project::Project;
use crate::settings::Settings;
use crate::task::Task;
use crate::timeline::{self, TimelineLayout, TimelineRow};
use chrono::NaiveDate;

/// Settings plus a clock, so callers do not thread `today` and the alert
/// window through every call.
#[derive(Debug, Clone)]
pub struct Evaluator<C: Clock = SystemClock> {
    settings: Settings,
    clock: C,
}

impl Evaluator<SystemClock> {
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Evaluator<C> {
    pub fn with_clock(settings: Settings, clock: C) -> Self {
        Self { settings, clock }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn task_alert(&self, task: &Task) -> Option<AlertType> {
        alert::task_alert(task, self.settings.alert_days_window, self.today())
    }

    pub fn project_health(&self, project: &Project) -> Health {
        aggregate::project_health(project, self.settings.alert_days_window, self.today())
    }

    pub fn project_progress(&self, project: &Project) -> Progress {
        aggregate::project_progress(project)
    }

    pub fn next_deadline(&self, project: &Project) -> Option<NaiveDate> {
        aggregate::next_deadline(project, self.today())
    }

    pub fn project_overview(&self, project: &Project) -> ProjectOverview {
        aggregate::project_overview(project, self.settings.alert_days_window, self.today())
    }

    pub fn portfolio_summary(&self, projects: &[Project]) -> PortfolioSummary {
        aggregate::portfolio_summary(projects, self.settings.alert_days_window, self.today())
    }

    pub fn alert_list<'a>(&self, projects: &'a [Project]) -> Vec<Alert<'a>> {
        alert_list::build_alert_list(projects, self.settings.alert_days_window, self.today())
    }

    /// Layout for the current year, with its rows.
    pub fn timeline(
        &self,
        projects: &[Project],
        owner: Option<&str>,
    ) -> Option<(TimelineLayout, Vec<TimelineRow>)> {
        let today = self.today();
        let layout = timeline::layout_for(today)?;
        let rows = layout.rows(projects, owner, today);
        Some((layout, rows))
    }
}
