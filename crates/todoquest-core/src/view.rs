//! Derived views over the task store.
//!
//! Pure functions of (tasks, filter, query, now). Nothing here mutates
//! state or caches results; overdue status in particular is computed per
//! query, never stored on the task.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStore};

/// Visibility filter for the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl TaskFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completed,
            TaskFilter::Pending => !task.completed,
        }
    }
}

impl std::str::FromStr for TaskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "completed" | "done" => Ok(TaskFilter::Completed),
            "pending" | "open" => Ok(TaskFilter::Pending),
            other => Err(format!("unknown filter '{other}'")),
        }
    }
}

/// A task paired with its derived overdue flag.
#[derive(Debug, Clone, Copy)]
pub struct TaskView<'a> {
    pub task: &'a Task,
    pub overdue: bool,
}

/// A task is overdue when its deadline is strictly in the past and it is
/// not completed.
pub fn is_overdue(task: &Task, now: DateTime<Local>) -> bool {
    match task.deadline {
        Some(deadline) => deadline < now && !task.completed,
        None => false,
    }
}

/// Visible tasks in insertion order: filter step, then case-insensitive
/// substring search on the task text (empty query passes everything).
pub fn visible_tasks<'a>(
    store: &'a TaskStore,
    filter: TaskFilter,
    query: &str,
    now: DateTime<Local>,
) -> Vec<TaskView<'a>> {
    let needle = query.to_lowercase();
    store
        .iter()
        .filter(|t| filter.matches(t))
        .filter(|t| needle.is_empty() || t.text.to_lowercase().contains(&needle))
        .map(|task| TaskView {
            task,
            overdue: is_overdue(task, now),
        })
        .collect()
}
