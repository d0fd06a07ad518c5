use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::{Task, TaskId};

/// Unique identifier of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProjectId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A named container of tasks, kept in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: String,
    task_list: Vec<Task>,
}

impl Project {
    /// Create an empty project with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            task_list: Vec::new(),
        }
    }

    /// Replace the generated id with a persisted one.
    pub(crate) fn restore_identity(mut self, id: ProjectId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tasks(&self) -> &[Task] {
        &self.task_list
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.task_list.iter().find(|t| t.id() == id)
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.task_list.iter_mut().find(|t| t.id() == id)
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Append a task and return a reference to it.
    pub(crate) fn push_task(&mut self, task: Task) -> &Task {
        self.task_list.push(task);
        &self.task_list[self.task_list.len() - 1]
    }

    /// Remove a task by id. Returns `false` if no such task exists.
    pub(crate) fn remove_task(&mut self, id: TaskId) -> bool {
        match self.task_list.iter().position(|t| t.id() == id) {
            Some(index) => {
                self.task_list.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.task_list = tasks;
    }

    /// Number of tasks still open.
    pub fn open_count(&self) -> usize {
        self.task_list.iter().filter(|t| !t.is_completed()).count()
    }
}
