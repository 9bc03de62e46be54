use super::StoreResult;
use crate::calculations::{delivery_timeliness, effort_efficiency};
use crate::project::Project;
use crate::task::Task;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One exported milestone with its derived columns filled in.
#[derive(Serialize)]
struct TaskCsvRecord<'a> {
    seq: i32,
    name: &'a str,
    owner: &'a str,
    status: &'static str,
    forecast_start: &'a str,
    forecast_deliver: &'a str,
    forecast_end: &'a str,
    actual_start: &'a str,
    actual_deliver: &'a str,
    actual_end: &'a str,
    cr_start: &'a str,
    cr_deliver: &'a str,
    cr_end: &'a str,
    timeliness: &'static str,
    efficiency: &'static str,
    memo: &'a str,
}

impl<'a> From<&'a Task> for TaskCsvRecord<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            seq: task.seq,
            name: &task.name,
            owner: &task.owner,
            status: task.status.as_str(),
            forecast_start: &task.forecast_start,
            forecast_deliver: &task.forecast_deliver,
            forecast_end: &task.forecast_end,
            actual_start: &task.actual_start,
            actual_deliver: &task.actual_deliver,
            actual_end: &task.actual_end,
            cr_start: &task.cr_start,
            cr_deliver: &task.cr_deliver,
            cr_end: &task.cr_end,
            timeliness: delivery_timeliness(task).map_or("", |t| t.as_str()),
            efficiency: effort_efficiency(task).map_or("", |e| e.as_str()),
            memo: &task.memo,
        }
    }
}

pub fn write_project_csv<W: Write>(project: &Project, writer: W) -> StoreResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for task in &project.tasks {
        writer.serialize(TaskCsvRecord::from(task))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_project_to_csv<P: AsRef<Path>>(project: &Project, path: P) -> StoreResult<()> {
    let file = File::create(path)?;
    write_project_csv(project, file)
}
