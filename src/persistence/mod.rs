use crate::project::Project;
use crate::settings::{Settings, SettingsError};
use log::warn;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum StoreError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    InvalidData(String),
    NotFound,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Serialization(err) => write!(f, "serialization error: {err}"),
            StoreError::Io(err) => write!(f, "io error: {err}"),
            StoreError::Csv(err) => write!(f, "csv error: {err}"),
            StoreError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            StoreError::NotFound => write!(f, "no projects stored"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Serialization(err) => Some(err),
            StoreError::Io(err) => Some(err),
            StoreError::Csv(err) => Some(err),
            StoreError::InvalidData(_) | StoreError::NotFound => None,
        }
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for StoreError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<SettingsError> for StoreError {
    fn from(value: SettingsError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything the metrics read in one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    #[serde(default)]
    pub settings: Settings,
}

impl Snapshot {
    pub fn new(projects: Vec<Project>, settings: Settings) -> Self {
        Self { projects, settings }
    }

    pub fn find_project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == project_id)
    }
}

/// Where project records live. Metrics only ever see the snapshots it returns.
pub trait ProjectStore {
    fn read(&self) -> StoreResult<Snapshot>;
    fn write(&self, snapshot: &Snapshot) -> StoreResult<()>;
}

/// Holds one snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
        }
    }
}

impl ProjectStore for MemoryStore {
    fn read(&self) -> StoreResult<Snapshot> {
        self.snapshot.lock().clone().ok_or(StoreError::NotFound)
    }

    fn write(&self, snapshot: &Snapshot) -> StoreResult<()> {
        validate_snapshot(snapshot)?;
        *self.snapshot.lock() = Some(snapshot.clone());
        Ok(())
    }
}

/// Check the invariants the metrics rely on.
///
/// Project ids are unique, task ids are unique within their project and the
/// alert window is positive. Dates that do not parse are logged and left in
/// place; the metrics treat them as absent.
pub fn validate_snapshot(snapshot: &Snapshot) -> StoreResult<()> {
    snapshot.settings.validate()?;

    let mut project_ids = HashSet::with_capacity(snapshot.projects.len());
    for project in &snapshot.projects {
        if !project_ids.insert(project.id.as_str()) {
            return Err(StoreError::InvalidData(format!(
                "duplicate project id '{}'",
                project.id
            )));
        }

        let mut task_ids = HashSet::with_capacity(project.tasks.len());
        for task in &project.tasks {
            if !task_ids.insert(task.id.as_str()) {
                return Err(StoreError::InvalidData(format!(
                    "project '{}' has duplicate task id '{}'",
                    project.id, task.id
                )));
            }
            for (field, raw) in task.malformed_dates() {
                warn!(
                    "project '{}' task '{}' has unparseable {field} '{raw}'; treating as empty",
                    project.id, task.id
                );
            }
        }
    }
    Ok(())
}

pub mod export;
pub mod file;

pub use export::{save_project_to_csv, write_project_csv};
pub use file::JsonFileStore;
