pub mod project;
pub mod task;

pub use project::{Project, ProjectId};
pub use task::{NewTask, ParsePriorityError, Priority, Task, TaskEdit, TaskId};
