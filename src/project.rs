use crate::task::{ParseEnumError, Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    #[default]
    Report,
    Verification,
    Assessment,
    Award,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 4] = [
        ProjectCategory::Report,
        ProjectCategory::Verification,
        ProjectCategory::Assessment,
        ProjectCategory::Award,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Report => "report",
            ProjectCategory::Verification => "verification",
            ProjectCategory::Assessment => "assessment",
            ProjectCategory::Award => "award",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| ParseEnumError::new("project category", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    InProgress,
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::NotStarted,
        ProjectStatus::InProgress,
        ProjectStatus::OnHold,
        ProjectStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "not_started",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::OnHold => "on_hold",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| ParseEnumError::new("project status", s))
    }
}

/// A tracked project and its milestones, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: ProjectCategory,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ProjectCategory,
        status: ProjectStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            status,
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn done_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .count()
    }
}

/// Keep projects of one category, or all of them when `category` is `None`.
pub fn filter_by_category(
    projects: &[Project],
    category: Option<ProjectCategory>,
) -> Vec<&Project> {
    projects
        .iter()
        .filter(|project| category.is_none_or(|c| project.category == c))
        .collect()
}
