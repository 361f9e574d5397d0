//! Task model and the in-memory task store.
//!
//! The store is the single owner of the task list. Tasks are keyed by a
//! stable id and kept in insertion order; every mutation goes through an
//! id-keyed lookup rather than positional indexing.

use chrono::{DateTime, Local, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::nldate;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// A step within a task. Completion is tracked per subtask but does not
/// feed the gamification counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    pub text: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(text: impl Into<String>) -> Self {
        Subtask {
            text: text.into(),
            completed: false,
        }
    }
}

/// A user-tracked to-do item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, stable for the task's lifetime.
    pub id: String,
    /// Display text. Never empty once stored.
    pub text: String,
    pub completed: bool,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    pub priority: Priority,
    /// Optional due time. Overdue status is derived at query time.
    pub deadline: Option<DateTime<Local>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    fn new(text: impl Into<String>) -> Self {
        let now = Utc::now();
        Task {
            id: format!("task-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            text: text.into(),
            completed: false,
            notes: String::new(),
            subtasks: Vec::new(),
            priority: Priority::Low,
            deadline: None,
            created_at: now,
        }
    }
}

/// Everything needed to create a task. The raw text is also fed through
/// the natural-language date extractor; a date found there wins over
/// `deadline`.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub text: String,
    pub notes: String,
    pub subtasks: Vec<String>,
    pub priority: Priority,
    pub deadline: Option<DateTime<Local>>,
}

impl TaskDraft {
    pub fn new(text: impl Into<String>) -> Self {
        TaskDraft {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn subtasks<I, S>(mut self, subtasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtasks = subtasks.into_iter().map(Into::into).collect();
        self
    }

    pub fn deadline(mut self, deadline: DateTime<Local>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Result of a completion toggle, fed into the progress tracker by the
/// application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Completed,
    Reopened,
}

/// In-memory task store. Owns the task list exclusively.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskStore {
    tasks: IndexMap<String, Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task from a draft, silently ignoring invalid input.
    ///
    /// Returns `None` without touching the list when the text trims to
    /// empty. The draft text is scanned for a natural-language date
    /// anchored at `now`; an extracted deadline overrides the explicit one.
    pub fn add(&mut self, draft: TaskDraft, now: DateTime<Local>) -> Option<&Task> {
        match self.try_add(draft, now) {
            Ok(task) => Some(task),
            Err(err) => {
                tracing::debug!(%err, "task not added");
                None
            }
        }
    }

    /// Add a task from a draft, surfacing blank text as `InvalidInput`.
    pub fn try_add(&mut self, draft: TaskDraft, now: DateTime<Local>) -> Result<&Task> {
        if draft.text.trim().is_empty() {
            return Err(CoreError::InvalidInput("task text is empty".into()));
        }
        let mut task = Task::new(draft.text);
        task.notes = draft.notes;
        task.subtasks = draft.subtasks.into_iter().map(Subtask::new).collect();
        task.priority = draft.priority;
        task.deadline = nldate::extract(&task.text, now).or(draft.deadline);
        tracing::debug!(id = %task.id, deadline = ?task.deadline, "task added");
        let id = task.id.clone();
        Ok(self.tasks.entry(id).or_insert(task))
    }

    /// Flip the completion flag of the identified task.
    pub fn toggle(&mut self, id: &str) -> Result<Toggle> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        task.completed = !task.completed;
        tracing::debug!(id, completed = task.completed, "task toggled");
        Ok(if task.completed {
            Toggle::Completed
        } else {
            Toggle::Reopened
        })
    }

    /// Remove a task permanently.
    pub fn remove(&mut self, id: &str) -> Result<Task> {
        self.tasks
            .shift_remove(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    pub fn set_notes(&mut self, id: &str, notes: impl Into<String>) -> Result<()> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        task.notes = notes.into();
        Ok(())
    }

    pub fn set_priority(&mut self, id: &str, priority: Priority) -> Result<()> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        task.priority = priority;
        Ok(())
    }

    /// Toggle one subtask of a task by position within that task.
    pub fn toggle_subtask(&mut self, id: &str, index: usize) -> Result<()> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        let subtask = task
            .subtasks
            .get_mut(index)
            .ok_or_else(|| CoreError::NotFound(format!("{id}#{index}")))?;
        subtask.completed = !subtask.completed;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Local> {
        Local::now()
    }

    #[test]
    fn add_appends_incomplete_task() {
        let mut store = TaskStore::new();
        let id = store
            .add(TaskDraft::new("Write report"), now())
            .map(|t| t.id.clone())
            .unwrap();
        assert_eq!(store.len(), 1);
        let task = store.get(&id).unwrap();
        assert_eq!(task.text, "Write report");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Low);
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut store = TaskStore::new();
        assert!(store.add(TaskDraft::new(""), now()).is_none());
        assert!(store.add(TaskDraft::new("   \t"), now()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn try_add_surfaces_blank_text_as_invalid_input() {
        let mut store = TaskStore::new();
        let err = store.try_add(TaskDraft::new("  "), now()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn add_converts_subtask_texts() {
        let mut store = TaskStore::new();
        let draft = TaskDraft::new("Pack bags").subtasks(["passport", "charger"]);
        let task = store.add(draft, now()).unwrap();
        assert_eq!(task.subtasks.len(), 2);
        assert!(task.subtasks.iter().all(|s| !s.completed));
        assert_eq!(task.subtasks[0].text, "passport");
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = TaskStore::new();
        for text in ["a", "b", "c"] {
            store.add(TaskDraft::new(text), now());
        }
        let texts: Vec<_> = store.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn ids_are_unique() {
        let mut store = TaskStore::new();
        for _ in 0..50 {
            store.add(TaskDraft::new("same text"), now());
        }
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn extracted_date_overrides_explicit_deadline() {
        let mut store = TaskStore::new();
        let explicit = Local::now() + chrono::Duration::days(30);
        let task = store
            .add(TaskDraft::new("Call mom tomorrow").deadline(explicit), now())
            .unwrap();
        let deadline = task.deadline.unwrap();
        assert_eq!(
            deadline.date_naive(),
            (Local::now() + chrono::Duration::days(1)).date_naive()
        );
    }

    #[test]
    fn explicit_deadline_kept_when_no_date_in_text() {
        let mut store = TaskStore::new();
        let explicit = Local::now() + chrono::Duration::days(3);
        let task = store
            .add(TaskDraft::new("Water the plants").deadline(explicit), now())
            .unwrap();
        assert_eq!(task.deadline, Some(explicit));
    }

    #[test]
    fn toggle_flips_and_reports_direction() {
        let mut store = TaskStore::new();
        let id = store
            .add(TaskDraft::new("x"), now())
            .map(|t| t.id.clone())
            .unwrap();
        assert_eq!(store.toggle(&id).unwrap(), Toggle::Completed);
        assert!(store.get(&id).unwrap().completed);
        assert_eq!(store.toggle(&id).unwrap(), Toggle::Reopened);
        assert!(!store.get(&id).unwrap().completed);
    }

    #[test]
    fn toggle_unknown_id_is_not_found() {
        let mut store = TaskStore::new();
        let err = store.toggle("task-0-missing").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn remove_deletes_and_keeps_order() {
        let mut store = TaskStore::new();
        let ids: Vec<String> = ["a", "b", "c"]
            .iter()
            .map(|t| store.add(TaskDraft::new(*t), now()).unwrap().id.clone())
            .collect();
        store.remove(&ids[1]).unwrap();
        let texts: Vec<_> = store.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert!(matches!(
            store.remove(&ids[1]),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn toggle_subtask_by_index() {
        let mut store = TaskStore::new();
        let id = store
            .add(TaskDraft::new("t").subtasks(["one"]), now())
            .map(|t| t.id.clone())
            .unwrap();
        store.toggle_subtask(&id, 0).unwrap();
        assert!(store.get(&id).unwrap().subtasks[0].completed);
        assert!(store.toggle_subtask(&id, 5).is_err());
    }

    #[test]
    fn task_serialization_roundtrip() {
        let mut store = TaskStore::new();
        store.add(
            TaskDraft::new("Ship release")
                .priority(Priority::High)
                .notes("check changelog"),
            now(),
        );
        let json = serde_json::to_string(&store).unwrap();
        let decoded: TaskStore = serde_json::from_str(&json).unwrap();
        let task = decoded.iter().next().unwrap();
        assert_eq!(task.text, "Ship release");
        assert_eq!(task.priority, Priority::High);
    }
}
