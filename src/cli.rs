use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

use crate::io::{export_csv, KeyValueStore};
use crate::model::{Priority, Project, ProjectId, Task, TaskEdit, TaskId};
use crate::store::{Missing, Outcome, TodoStore};

#[derive(Debug, Parser)]
#[command(name = "todo")]
#[command(about = "Projects and tasks from the command line", version)]
pub struct Cli {
    /// Directory holding the saved projects.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all projects.
    Projects,
    /// Show the tasks of a project.
    Show { project: String },
    AddProject { name: String },
    RenameProject { project: String, name: String },
    RemoveProject { project: String },
    AddTask {
        project: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date as YYYY-MM-DD.
        #[arg(long, value_parser = parse_due_date)]
        due: NaiveDate,
        #[arg(long, default_value = "Medium")]
        priority: Priority,
    },
    /// Change a task; omitted fields keep their value.
    EditTask {
        project: String,
        task: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_due_date)]
        due: Option<NaiveDate>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    RemoveTask { project: String, task: TaskId },
    /// Mark a task done, or open again.
    Toggle { project: String, task: TaskId },
    /// Write a project's tasks to a CSV file.
    Export { project: String, path: PathBuf },
}

fn parse_due_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected a date like 2026-03-01: {e}"))
}

fn non_empty(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("{what} must not be empty");
    }
    Ok(trimmed.to_string())
}

/// Accept a project id or an exact (case-insensitive) project name.
fn resolve_project<S: KeyValueStore>(store: &TodoStore<S>, key: &str) -> Result<ProjectId> {
    if let Ok(id) = key.parse::<ProjectId>() {
        return Ok(id);
    }
    let mut matches = store
        .projects()
        .iter()
        .filter(|p| p.name().eq_ignore_ascii_case(key.trim()));
    match (matches.next(), matches.next()) {
        (Some(project), None) => Ok(project.id()),
        (Some(_), Some(_)) => bail!("more than one project is named `{key}`; use its id"),
        (None, _) => bail!("no project named `{key}`"),
    }
}

fn expect_done<T>(outcome: Outcome<T>) -> Result<T> {
    match outcome {
        Outcome::Done(value) => Ok(value),
        Outcome::NotFound(Missing::Project(id)) => Err(anyhow!("project {id} not found")),
        Outcome::NotFound(Missing::Task(id)) => Err(anyhow!("task {id} not found")),
    }
}

fn render_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects.");
        return;
    }
    for project in projects {
        println!(
            "{}  {}  ({}/{} open)",
            project.id(),
            project.name(),
            project.open_count(),
            project.tasks().len()
        );
    }
}

fn render_task(task: &Task) {
    let mark = if task.is_completed() { "x" } else { " " };
    println!(
        "[{mark}] {}  {}  due {}  {}",
        task.id(),
        task.title(),
        task.due_date().format("%Y-%m-%d"),
        task.priority()
    );
    if !task.description().is_empty() {
        println!("      {}", task.description());
    }
}

fn render_project(project: &Project) {
    println!("{} ({})", project.name(), project.id());
    if project.tasks().is_empty() {
        println!("  No tasks.");
    }
    for task in project.tasks() {
        render_task(task);
    }
}

/// Execute one command against the store and print the result.
pub fn run<S: KeyValueStore>(store: &mut TodoStore<S>, command: Command) -> Result<()> {
    match command {
        Command::Projects => render_projects(store.projects()),
        Command::Show { project } => {
            let id = resolve_project(store, &project)?;
            let project = store
                .project(id)
                .ok_or_else(|| anyhow!("project {id} not found"))?;
            render_project(project);
        }
        Command::AddProject { name } => {
            let name = non_empty(&name, "project name")?;
            let project = store.create_project(name)?;
            println!("Created project {} ({})", project.name(), project.id());
        }
        Command::RenameProject { project, name } => {
            let id = resolve_project(store, &project)?;
            let name = non_empty(&name, "project name")?;
            expect_done(store.rename_project(id, name)?)?;
            render_projects(store.projects());
        }
        Command::RemoveProject { project } => {
            let id = resolve_project(store, &project)?;
            expect_done(store.remove_project(id)?)?;
            render_projects(store.projects());
        }
        Command::AddTask {
            project,
            title,
            description,
            due,
            priority,
        } => {
            let id = resolve_project(store, &project)?;
            let fields = TaskEdit {
                title: non_empty(&title, "task title")?,
                description: description.trim().to_string(),
                due_date: due,
                priority,
            };
            let task = expect_done(store.create_task(id, fields)?)?;
            render_task(task);
        }
        Command::EditTask {
            project,
            task,
            title,
            description,
            due,
            priority,
        } => {
            let id = resolve_project(store, &project)?;
            let current = store
                .task(id, task)
                .ok_or_else(|| anyhow!("task {task} not found"))?;
            let edit = TaskEdit {
                title: match title {
                    Some(title) => non_empty(&title, "task title")?,
                    None => current.title().to_string(),
                },
                description: description
                    .map(|d| d.trim().to_string())
                    .unwrap_or_else(|| current.description().to_string()),
                due_date: due.unwrap_or(current.due_date()),
                priority: priority.unwrap_or(current.priority()),
            };
            expect_done(store.update_task(id, task, edit)?)?;
            if let Some(task) = store.task(id, task) {
                render_task(task);
            }
        }
        Command::RemoveTask { project, task } => {
            let id = resolve_project(store, &project)?;
            expect_done(store.remove_task(id, task)?)?;
            if let Some(project) = store.project(id) {
                render_project(project);
            }
        }
        Command::Toggle { project, task } => {
            let id = resolve_project(store, &project)?;
            let completed = expect_done(store.toggle_task_complete_status(id, task)?)?;
            println!(
                "Task {task} is now {}",
                if completed { "done" } else { "open" }
            );
        }
        Command::Export { project, path } => {
            let id = resolve_project(store, &project)?;
            let project = store
                .project(id)
                .ok_or_else(|| anyhow!("project {id} not found"))?;
            let count = export_csv(project, &path)
                .with_context(|| format!("exporting `{}`", project.name()))?;
            println!("Exported {count} tasks to {}", path.display());
        }
    }
    Ok(())
}
