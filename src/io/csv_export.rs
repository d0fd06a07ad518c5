use crate::error::ExportError;
use crate::model::{Project, Task};
use std::path::Path;

/// Map the completion flag to a human-readable status string.
fn completion_status(task: &Task) -> &'static str {
    if task.is_completed() {
        "Done"
    } else {
        "Open"
    }
}

/// Export a project's tasks to a semicolon-delimited CSV file.
///
/// Columns: Title ; Description ; Due Date ; Priority ; Status
/// Dates are formatted as YYYY-MM-DD.
/// Returns the number of tasks written.
pub fn export_csv(project: &Project, path: &Path) -> Result<usize, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|source| ExportError::Create {
            path: path.to_path_buf(),
            source,
        })?;

    wtr.write_record(["Title", "Description", "Due Date", "Priority", "Status"])?;

    for task in project.tasks() {
        let due = task.due_date().format("%Y-%m-%d").to_string();
        wtr.write_record([
            task.title(),
            task.description(),
            due.as_str(),
            task.priority().label(),
            completion_status(task),
        ])
        .map_err(|source| ExportError::Row {
            title: task.title().to_string(),
            source,
        })?;
    }

    wtr.flush()?;
    Ok(project.tasks().len())
}
