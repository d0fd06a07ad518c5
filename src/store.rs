use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::error::{CodecError, StoreError};
use crate::io::{self, KeyValueStore};
use crate::model::{NewTask, Priority, Project, ProjectId, Task, TaskEdit, TaskId};

/// Name of the project created on first run.
pub const INBOX_NAME: &str = "Inbox";

/// Which entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Project(ProjectId),
    Task(TaskId),
}

/// Result of a mutation that addresses an entity by id.
///
/// A missing id is not an error: the store stays unchanged, still persists,
/// and reports which id was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Done(T),
    NotFound(Missing),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::NotFound(_) => None,
        }
    }

    pub fn missing(&self) -> Option<Missing> {
        match self {
            Outcome::Done(_) => None,
            Outcome::NotFound(missing) => Some(*missing),
        }
    }
}

/// The authoritative list of projects and the only way to change it.
///
/// Every mutating call writes a full snapshot to `storage` before
/// returning, so the persisted copy never lags by more than one call.
#[derive(Debug)]
pub struct TodoStore<S: KeyValueStore> {
    projects: Vec<Project>,
    storage: S,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Restore the previous session from `storage`, or seed the inbox.
    ///
    /// A snapshot that fails to parse is logged and treated as absent.
    pub fn open(mut storage: S) -> Result<Self, StoreError> {
        let loaded = match io::load(&storage) {
            Ok(raw) => raw,
            Err(CodecError::Malformed(e)) => {
                warn!("discarding malformed snapshot key={} error={}", io::STORAGE_KEY, e);
                None
            }
            Err(e) => return Err(StoreError::Load(e)),
        };

        let projects = match loaded {
            Some(raw) => {
                let projects = io::rehydrate(raw);
                info!("restored session projects={}", projects.len());
                projects
            }
            None => {
                let projects = seed_projects();
                io::save(&mut storage, &projects).map_err(StoreError::Persist)?;
                info!("seeded first-run projects={}", projects.len());
                projects
            }
        };

        Ok(Self { projects, storage })
    }

    // ── Read-only views ─────────────────────────────────────────

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    pub fn task(&self, project_id: ProjectId, task_id: TaskId) -> Option<&Task> {
        self.project(project_id)?.task(task_id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Append a new empty project. The name is stored as given.
    pub fn create_project(&mut self, name: impl Into<String>) -> Result<&Project, StoreError> {
        self.projects.push(Project::new(name));
        self.persist()?;
        let project = &self.projects[self.projects.len() - 1];
        debug!("created project id={}", project.id());
        Ok(project)
    }

    /// Remove a project and, with it, all of its tasks.
    pub fn remove_project(&mut self, id: ProjectId) -> Result<Outcome<()>, StoreError> {
        let outcome = match self.projects.iter().position(|p| p.id() == id) {
            Some(index) => {
                let removed = self.projects.remove(index);
                debug!(
                    "removed project id={} tasks={}",
                    id,
                    removed.tasks().len()
                );
                Outcome::Done(())
            }
            None => Outcome::NotFound(Missing::Project(id)),
        };
        self.persist()?;
        Ok(outcome)
    }

    pub fn rename_project(
        &mut self,
        id: ProjectId,
        name: impl Into<String>,
    ) -> Result<Outcome<()>, StoreError> {
        let outcome = match self.project_mut(id) {
            Some(project) => {
                project.rename(name);
                Outcome::Done(())
            }
            None => Outcome::NotFound(Missing::Project(id)),
        };
        self.persist()?;
        Ok(outcome)
    }

    /// Append a new, incomplete task to a project.
    pub fn create_task(
        &mut self,
        project_id: ProjectId,
        fields: NewTask,
    ) -> Result<Outcome<&Task>, StoreError> {
        let Some(index) = self.projects.iter().position(|p| p.id() == project_id) else {
            self.persist()?;
            return Ok(Outcome::NotFound(Missing::Project(project_id)));
        };
        self.projects[index].push_task(Task::new(project_id, fields));
        self.persist()?;

        let tasks = self.projects[index].tasks();
        let task = &tasks[tasks.len() - 1];
        debug!("created task id={} project={}", task.id(), project_id);
        Ok(Outcome::Done(task))
    }

    pub fn remove_task(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<Outcome<()>, StoreError> {
        let outcome = match self.project_mut(project_id).map(|p| p.remove_task(task_id)) {
            Some(true) => Outcome::Done(()),
            Some(false) => Outcome::NotFound(Missing::Task(task_id)),
            None => Outcome::NotFound(Missing::Project(project_id)),
        };
        self.persist()?;
        Ok(outcome)
    }

    /// Replace a task's title, description, due date and priority.
    pub fn update_task(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
        edit: TaskEdit,
    ) -> Result<Outcome<()>, StoreError> {
        let outcome = self.with_task(project_id, task_id, |task| task.apply_edit(edit));
        self.persist()?;
        Ok(outcome)
    }

    /// Flip a task's completion flag. Yields the new value.
    pub fn toggle_task_complete_status(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<Outcome<bool>, StoreError> {
        let outcome = self.with_task(project_id, task_id, Task::toggle_completed);
        self.persist()?;
        Ok(outcome)
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id() == id)
    }

    fn with_task<T>(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
        f: impl FnOnce(&mut Task) -> T,
    ) -> Outcome<T> {
        let Some(project) = self.project_mut(project_id) else {
            return Outcome::NotFound(Missing::Project(project_id));
        };
        match project.task_mut(task_id) {
            Some(task) => Outcome::Done(f(task)),
            None => Outcome::NotFound(Missing::Task(task_id)),
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        io::save(&mut self.storage, &self.projects).map_err(StoreError::Persist)
    }
}

const fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}

const BUY_DUE: NaiveDate = seed_date(2026, 1, 7);
const GETTING_STARTED_DUE: NaiveDate = seed_date(2026, 2, 22);
const ORGANIZE_DUE: NaiveDate = seed_date(2026, 5, 30);

/// The inbox with its three starter tasks.
fn seed_projects() -> Vec<Project> {
    let mut inbox = Project::new(INBOX_NAME);
    let inbox_id = inbox.id();

    let samples = [
        (
            "Buy",
            "This is your inbox where all your tasks will appear. Feel free to add, edit, or delete tasks as you like.",
            BUY_DUE,
            Priority::High,
        ),
        (
            "Getting Started",
            "To create a new project, click on the 'Add Project' button. You can then add tasks to your projects.",
            GETTING_STARTED_DUE,
            Priority::Medium,
        ),
        (
            "Organize Your Tasks",
            "You can set due dates and priorities for your tasks to help you stay organized and focused.",
            ORGANIZE_DUE,
            Priority::Low,
        ),
    ];

    for (title, description, due_date, priority) in samples {
        inbox.push_task(Task::new(
            inbox_id,
            TaskEdit {
                title: title.to_string(),
                description: description.to_string(),
                due_date,
                priority,
            },
        ));
    }

    vec![inbox]
}
