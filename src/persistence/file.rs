use super::{ProjectStore, Snapshot, StoreError, StoreResult, validate_snapshot};
use crate::project::Project;
use crate::settings::Settings;
use log::debug;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

const PROJECTS_FILE: &str = "projects.json";
const SETTINGS_FILE: &str = "settings.json";

/// A directory holding `projects.json` and an optional `settings.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn projects_path(&self) -> PathBuf {
        self.dir.join(PROJECTS_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    fn read_projects(&self) -> StoreResult<Vec<Project>> {
        let file = match File::open(self.projects_path()) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn read_settings(&self) -> StoreResult<Settings> {
        match File::open(self.settings_path()) {
            Ok(file) => Ok(serde_json::from_reader(BufReader::new(file))?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "no {} in {}; using default settings",
                    SETTINGS_FILE,
                    self.dir.display()
                );
                Ok(Settings::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl ProjectStore for JsonFileStore {
    fn read(&self) -> StoreResult<Snapshot> {
        let snapshot = Snapshot::new(self.read_projects()?, self.read_settings()?);
        validate_snapshot(&snapshot)?;
        debug!(
            "loaded {} projects from {}",
            snapshot.projects.len(),
            self.dir.display()
        );
        Ok(snapshot)
    }

    fn write(&self, snapshot: &Snapshot) -> StoreResult<()> {
        validate_snapshot(snapshot)?;
        fs::create_dir_all(&self.dir)?;
        serde_json::to_writer_pretty(File::create(self.projects_path())?, &snapshot.projects)?;
        serde_json::to_writer_pretty(File::create(self.settings_path())?, &snapshot.settings)?;
        Ok(())
    }
}
