use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::io::storage::KeyValueStore;
use crate::model::{Priority, Project, ProjectId, Task, TaskEdit, TaskId};

/// Key under which the full project list is stored.
pub const STORAGE_KEY: &str = "todo_projects";

/// A project record as parsed from storage, before rehydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub task_list: Vec<RawTask>,
}

/// A task record as parsed from storage, before rehydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    pub id: TaskId,
    #[serde(rename = "projectID")]
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

/// Serialize the whole project list and overwrite the stored snapshot.
pub fn save<S: KeyValueStore + ?Sized>(
    storage: &mut S,
    projects: &[Project],
) -> Result<(), CodecError> {
    let json = serde_json::to_string(projects).map_err(CodecError::Serialize)?;
    storage.set(STORAGE_KEY, &json)?;
    debug!(
        "saved snapshot key={} projects={} bytes={}",
        STORAGE_KEY,
        projects.len(),
        json.len()
    );
    Ok(())
}

/// Read the stored snapshot.
///
/// Returns `Ok(None)` when nothing has been saved yet. The records are not
/// domain entities; pass them through [`rehydrate`] first.
pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Result<Option<Vec<RawProject>>, CodecError> {
    let Some(json) = storage.get(STORAGE_KEY)? else {
        return Ok(None);
    };
    let raw: Vec<RawProject> = serde_json::from_str(&json).map_err(CodecError::Malformed)?;
    check_references(&raw)
        .map_err(|msg| CodecError::Malformed(serde_json::Error::custom(msg)))?;
    debug!("loaded snapshot key={} projects={}", STORAGE_KEY, raw.len());
    Ok(Some(raw))
}

/// Ids must be unique per kind, and every task must point back at the
/// project that contains it.
fn check_references(raw_projects: &[RawProject]) -> Result<(), String> {
    let mut project_ids = HashSet::new();
    let mut task_ids = HashSet::new();
    for project in raw_projects {
        if !project_ids.insert(project.id) {
            return Err(format!("duplicate project id {}", project.id));
        }
        for task in &project.task_list {
            if !task_ids.insert(task.id) {
                return Err(format!("duplicate task id {}", task.id));
            }
            if task.project_id != project.id {
                return Err(format!(
                    "task {} refers to project {} but is stored under {}",
                    task.id, task.project_id, project.id
                ));
            }
        }
    }
    Ok(())
}

/// Rebuild typed projects and tasks from raw records.
///
/// Each entity is constructed normally and then has its persisted identity
/// (and, for tasks, completion state) restored.
pub fn rehydrate(raw_projects: Vec<RawProject>) -> Vec<Project> {
    raw_projects
        .into_iter()
        .map(|raw_project| {
            let project_id = raw_project.id;
            let mut project = Project::new(raw_project.name).restore_identity(project_id);
            let tasks = raw_project
                .task_list
                .into_iter()
                .map(|raw_task| {
                    Task::new(
                        project_id,
                        TaskEdit {
                            title: raw_task.title,
                            description: raw_task.description,
                            due_date: raw_task.due_date,
                            priority: raw_task.priority,
                        },
                    )
                    .restore_state(raw_task.id, raw_task.completed)
                })
                .collect();
            project.set_tasks(tasks);
            project
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    fn sample_projects() -> Vec<Project> {
        let mut groceries = Project::new("Groceries");
        let milk = Task::new(
            groceries.id(),
            TaskEdit {
                title: "Milk".into(),
                description: String::new(),
                due_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                priority: Priority::Low,
            },
        );
        let mut bread = Task::new(
            groceries.id(),
            TaskEdit {
                title: "Bread".into(),
                description: "sourdough".into(),
                due_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                priority: Priority::High,
            },
        );
        bread.toggle_completed();
        groceries.push_task(milk);
        groceries.push_task(bread);
        vec![groceries, Project::new("Empty")]
    }

    #[test]
    fn load_without_snapshot_is_none() {
        let store = MemoryStore::new();
        assert!(load(&store).unwrap().is_none());
    }

    #[test]
    fn save_load_rehydrate_reproduces_projects() {
        let projects = sample_projects();
        let mut store = MemoryStore::new();
        save(&mut store, &projects).unwrap();

        let restored = rehydrate(load(&store).unwrap().unwrap());
        assert_eq!(restored, projects);
        assert!(restored[0].tasks()[1].is_completed());
    }

    #[test]
    fn snapshot_uses_persisted_layout() {
        let projects = sample_projects();
        let mut store = MemoryStore::new();
        save(&mut store, &projects).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&store.get(STORAGE_KEY).unwrap().unwrap()).unwrap();
        let task = &json[0]["taskList"][0];
        assert_eq!(json[0]["name"], "Groceries");
        assert_eq!(task["projectID"], json[0]["id"]);
        assert_eq!(task["dueDate"], "2026-03-01");
        assert_eq!(task["priority"], "Low");
        assert_eq!(task["completed"], false);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let mut store = MemoryStore::new();
        save(&mut store, &sample_projects()).unwrap();
        save(&mut store, &[]).unwrap();
        assert_eq!(load(&store).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn malformed_snapshot_is_reported() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        assert!(matches!(load(&store), Err(CodecError::Malformed(_))));

        store
            .set(STORAGE_KEY, r#"[{"id":"x","name":"bad id","taskList":[]}]"#)
            .unwrap();
        assert!(matches!(load(&store), Err(CodecError::Malformed(_))));
    }

    const PROJECT_A: &str = "7f6c1b2a-3d4e-4f50-8a9b-0c1d2e3f4a5b";
    const PROJECT_B: &str = "11111111-2222-4333-8444-555555555555";
    const TASK_A: &str = "0b1c2d3e-4f50-4a6b-8c7d-9e0f1a2b3c4d";

    fn task_json(id: &str, project_id: &str) -> String {
        format!(
            r#"{{"id":"{id}","projectID":"{project_id}","title":"t","description":"","dueDate":"2026-01-07","priority":"Low","completed":false}}"#
        )
    }

    fn store_with(json: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, json).unwrap();
        store
    }

    #[test]
    fn duplicate_project_ids_are_malformed() {
        let store = store_with(&format!(
            r#"[{{"id":"{PROJECT_A}","name":"A","taskList":[]}},{{"id":"{PROJECT_A}","name":"B","taskList":[]}}]"#
        ));
        let err = load(&store).unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));
        assert!(err.to_string().contains("duplicate project id"));
    }

    #[test]
    fn duplicate_task_ids_across_projects_are_malformed() {
        let store = store_with(&format!(
            r#"[{{"id":"{PROJECT_A}","name":"A","taskList":[{}]}},{{"id":"{PROJECT_B}","name":"B","taskList":[{}]}}]"#,
            task_json(TASK_A, PROJECT_A),
            task_json(TASK_A, PROJECT_B),
        ));
        let err = load(&store).unwrap_err();
        assert!(err.to_string().contains("duplicate task id"));
    }

    #[test]
    fn task_under_foreign_project_is_malformed() {
        let store = store_with(&format!(
            r#"[{{"id":"{PROJECT_A}","name":"A","taskList":[{}]}}]"#,
            task_json(TASK_A, PROJECT_B),
        ));
        assert!(matches!(load(&store), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn rehydrate_takes_owner_from_containing_project() {
        let raw: Vec<RawProject> = serde_json::from_str(&format!(
            r#"[{{"id":"{PROJECT_A}","name":"A","taskList":[{}]}}]"#,
            task_json(TASK_A, PROJECT_B),
        ))
        .unwrap();
        let projects = rehydrate(raw);
        assert_eq!(projects[0].tasks()[0].project_id(), projects[0].id());
    }

    #[test]
    fn rehydrate_restores_ids_from_raw_records() {
        let json = r#"[{
            "id": "7f6c1b2a-3d4e-4f50-8a9b-0c1d2e3f4a5b",
            "name": "Inbox",
            "taskList": [{
                "id": "0b1c2d3e-4f50-4a6b-8c7d-9e0f1a2b3c4d",
                "projectID": "7f6c1b2a-3d4e-4f50-8a9b-0c1d2e3f4a5b",
                "title": "Buy",
                "description": "",
                "dueDate": "2026-01-07",
                "priority": "High",
                "completed": true
            }]
        }]"#;
        let raw: Vec<RawProject> = serde_json::from_str(json).unwrap();
        let projects = rehydrate(raw);

        let project = &projects[0];
        assert_eq!(
            project.id().to_string(),
            "7f6c1b2a-3d4e-4f50-8a9b-0c1d2e3f4a5b"
        );
        let task = &project.tasks()[0];
        assert_eq!(task.id().to_string(), "0b1c2d3e-4f50-4a6b-8c7d-9e0f1a2b3c4d");
        assert_eq!(task.project_id(), project.id());
        assert_eq!(task.priority(), Priority::High);
        assert!(task.is_completed());
    }
}
