use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::project::ProjectId;

/// Unique identifier of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TaskId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// How urgent a task is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string is not one of `High`, `Medium` or `Low`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority `{0}` (expected High, Medium or Low)")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// The user-editable fields of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

/// Input for creating a task. Same fields as an edit.
pub type NewTask = TaskEdit;

/// A single actionable item belonging to a project.
///
/// Tasks are created and mutated only through the store; the serialized
/// shape uses the camelCase field names of the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    #[serde(rename = "projectID")]
    project_id: ProjectId,
    title: String,
    description: String,
    due_date: NaiveDate,
    priority: Priority,
    completed: bool,
}

impl Task {
    /// Create a new, incomplete task with a fresh id.
    pub fn new(project_id: ProjectId, fields: TaskEdit) -> Self {
        let TaskEdit {
            title,
            description,
            due_date,
            priority,
        } = fields;
        Self {
            id: TaskId::new(),
            project_id,
            title,
            description,
            due_date,
            priority,
            completed: false,
        }
    }

    /// Replace the generated id and completion flag with persisted values.
    pub(crate) fn restore_state(mut self, id: TaskId, completed: bool) -> Self {
        self.id = id;
        self.completed = completed;
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flip the completion flag and return the new value.
    pub(crate) fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Overwrite the editable fields. Id, owner and completion are kept.
    pub(crate) fn apply_edit(&mut self, edit: TaskEdit) {
        self.title = edit.title;
        self.description = edit.description;
        self.due_date = edit.due_date;
        self.priority = edit.priority;
    }
}
