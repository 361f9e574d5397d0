//! Gamification bookkeeping: XP, streaks, the daily goal and achievements.
//!
//! The tracker never looks at the task list. It reacts to completion
//! events raised by the application layer and exposes a read-only
//! snapshot. Re-opening a task reverses nothing here; XP and the streak
//! only ever grow.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_GOAL: u32 = 5;
pub const DEFAULT_XP_REWARD: u32 = 10;

/// Streak length at which the streak achievement unlocks.
const STREAK_ACHIEVEMENT_AT: u32 = 5;

/// A named achievement and its unlock state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Achievement {
    pub title: String,
    pub unlocked: bool,
}

impl Achievement {
    fn locked(title: &str) -> Self {
        Achievement {
            title: title.to_string(),
            unlocked: false,
        }
    }
}

/// What a single completion did to the counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub xp_awarded: u32,
    /// True when this completion hit the daily goal exactly.
    pub goal_reached: bool,
    /// Titles of achievements unlocked by this completion.
    pub unlocked: Vec<String>,
}

/// Read-only view of the counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub xp: u32,
    pub streak: u32,
    pub completed_today: u32,
    pub daily_goal: u32,
    pub achievements: Vec<Achievement>,
}

/// Owns the gamification counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressTracker {
    xp: u32,
    streak: u32,
    completed_today: u32,
    daily_goal: u32,
    xp_reward: u32,
    total_completed: u32,
    achievements: Vec<Achievement>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_GOAL, DEFAULT_XP_REWARD)
    }
}

impl ProgressTracker {
    pub fn new(daily_goal: u32, xp_reward: u32) -> Self {
        ProgressTracker {
            xp: 0,
            streak: 0,
            completed_today: 0,
            daily_goal: daily_goal.max(1),
            xp_reward,
            total_completed: 0,
            achievements: vec![
                Achievement::locked("First Task"),
                Achievement::locked("5-Day Streak"),
            ],
        }
    }

    /// React to a task moving from pending to completed.
    ///
    /// Awards XP, advances the daily counter, and bumps the streak exactly
    /// once, at the moment the counter hits the goal.
    pub fn on_task_completed(&mut self) -> CompletionOutcome {
        self.xp += self.xp_reward;
        self.completed_today += 1;
        self.total_completed += 1;

        let goal_reached = self.completed_today == self.daily_goal;
        if goal_reached {
            self.streak += 1;
            tracing::debug!(streak = self.streak, "daily goal reached");
        }

        let mut unlocked = Vec::new();
        if self.total_completed == 1 {
            self.unlock("First Task", &mut unlocked);
        }
        if self.streak >= STREAK_ACHIEVEMENT_AT {
            self.unlock("5-Day Streak", &mut unlocked);
        }

        CompletionOutcome {
            xp_awarded: self.xp_reward,
            goal_reached,
            unlocked,
        }
    }

    fn unlock(&mut self, title: &str, out: &mut Vec<String>) {
        if let Some(a) = self
            .achievements
            .iter_mut()
            .find(|a| a.title == title && !a.unlocked)
        {
            a.unlocked = true;
            out.push(a.title.clone());
            tracing::debug!(title, "achievement unlocked");
        }
    }

    /// Start a fresh day: the daily counter resets, the streak survives.
    pub fn roll_over_day(&mut self) {
        self.completed_today = 0;
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            xp: self.xp,
            streak: self.streak,
            completed_today: self.completed_today,
            daily_goal: self.daily_goal,
            achievements: self.achievements.clone(),
        }
    }
}
