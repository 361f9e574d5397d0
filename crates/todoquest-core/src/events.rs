use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The presentation layer consumes these to decide what to redraw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TaskAdded {
        task_id: String,
        text: String,
        deadline: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        task_id: String,
        xp_awarded: u32,
        at: DateTime<Utc>,
    },
    /// A completed task was toggled back to pending. XP and streak are
    /// intentionally not reversed.
    TaskReopened {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskRemoved {
        task_id: String,
        at: DateTime<Utc>,
    },
    /// The daily goal was reached; the streak counter advanced.
    GoalReached {
        streak: u32,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        title: String,
        at: DateTime<Utc>,
    },
    TimerStarted {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Emitted exactly once per run.
    TimerFinished {
        at: DateTime<Utc>,
    },
    LoggedIn {
        user: String,
        at: DateTime<Utc>,
    },
    LoggedOut {
        at: DateTime<Utc>,
    },
    TimerSnapshot {
        state: TimerState,
        remaining_secs: u32,
        total_secs: u32,
        at: DateTime<Utc>,
    },
}
