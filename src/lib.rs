//! Projects, tasks, and their persisted snapshot.
//!
//! [`TodoStore`] owns the project list and writes it to a
//! [`KeyValueStore`] after every change. On open it either rehydrates the
//! previous session or seeds an "Inbox" project.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod store;

pub use error::{CodecError, ExportError, StorageError, StoreError};
pub use io::{FileStore, KeyValueStore, MemoryStore};
pub use model::{NewTask, Priority, Project, ProjectId, Task, TaskEdit, TaskId};
pub use store::{Missing, Outcome, TodoStore, INBOX_NAME};
