//! Application state container.
//!
//! One `App` value owns the task store, the progress tracker, the pomodoro
//! timer and the session gate, and mediates the control flow between them:
//! user intent comes in, the store mutates, completion events feed the
//! tracker, and the presentation layer reads snapshots back out. There are
//! no module-level singletons; the presentation layer is handed an `App`.

use chrono::{Local, Utc};

use crate::config::{Config, Language, Theme};
use crate::error::Result;
use crate::events::Event;
use crate::progress::{ProgressSnapshot, ProgressTracker};
use crate::session::SessionGate;
use crate::speech::SpeechCapture;
use crate::task::{TaskDraft, TaskStore, Toggle};
use crate::timer::PomodoroTimer;
use crate::view::{self, TaskFilter, TaskView};

pub const MOTIVATIONAL_QUOTE: &str = "Start small, win big!";
const SUGGESTED_TASK: &str = "Take a 5-minute break";

pub struct App {
    store: TaskStore,
    progress: ProgressTracker,
    timer: PomodoroTimer,
    session: SessionGate,
    theme: Theme,
    language: Language,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            store: TaskStore::new(),
            progress: ProgressTracker::new(config.daily_goal, config.xp_reward),
            timer: PomodoroTimer::new(config.pomodoro_minutes.saturating_mul(60)),
            session: SessionGate::new(),
            theme: config.theme,
            language: config.language,
        }
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a task. Blank text degrades to a no-op.
    pub fn add_task(&mut self, draft: TaskDraft) -> Option<Event> {
        let task = self.store.add(draft, Local::now())?;
        Some(Event::TaskAdded {
            task_id: task.id.clone(),
            text: task.text.clone(),
            deadline: task.deadline.map(|d| d.with_timezone(&Utc)),
            at: Utc::now(),
        })
    }

    /// Toggle completion and run the gamification bookkeeping.
    ///
    /// Completing a task awards XP and may advance the streak or unlock
    /// achievements; re-opening one reverses none of that.
    pub fn toggle_task(&mut self, id: &str) -> Result<Vec<Event>> {
        let now = Utc::now();
        let mut events = Vec::new();
        match self.store.toggle(id)? {
            Toggle::Completed => {
                let outcome = self.progress.on_task_completed();
                events.push(Event::TaskCompleted {
                    task_id: id.to_string(),
                    xp_awarded: outcome.xp_awarded,
                    at: now,
                });
                if outcome.goal_reached {
                    events.push(Event::GoalReached {
                        streak: self.progress.streak(),
                        at: now,
                    });
                }
                for title in outcome.unlocked {
                    events.push(Event::AchievementUnlocked { title, at: now });
                }
            }
            Toggle::Reopened => {
                events.push(Event::TaskReopened {
                    task_id: id.to_string(),
                    at: now,
                });
            }
        }
        Ok(events)
    }

    pub fn set_task_notes(&mut self, id: &str, notes: impl Into<String>) -> Result<()> {
        self.store.set_notes(id, notes)
    }

    pub fn set_task_priority(&mut self, id: &str, priority: crate::task::Priority) -> Result<()> {
        self.store.set_priority(id, priority)
    }

    pub fn toggle_subtask(&mut self, id: &str, index: usize) -> Result<()> {
        self.store.toggle_subtask(id, index)
    }

    pub fn remove_task(&mut self, id: &str) -> Result<Event> {
        let task = self.store.remove(id)?;
        Ok(Event::TaskRemoved {
            task_id: task.id,
            at: Utc::now(),
        })
    }

    /// Visible tasks for the current moment.
    pub fn visible_tasks(&self, filter: TaskFilter, query: &str) -> Vec<TaskView<'_>> {
        view::visible_tasks(&self.store, filter, query, Local::now())
    }

    /// Canned suggestion for the "suggest" intent.
    pub fn suggest_task(&self) -> &'static str {
        SUGGESTED_TASK
    }

    /// Fill the pending task text from the speech capability, if present.
    /// Absence of the capability is a logged no-op.
    pub fn voice_input(&self, speech: &dyn SpeechCapture) -> Option<String> {
        match speech.transcribe() {
            Ok(transcript) => Some(transcript),
            Err(err) => {
                tracing::warn!(%err, "voice input unavailable");
                None
            }
        }
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start_timer(&mut self) -> Option<Event> {
        self.timer.start()
    }

    pub fn pause_timer(&mut self) -> Option<Event> {
        self.timer.pause()
    }

    pub fn reset_timer(&mut self) -> Option<Event> {
        self.timer.reset()
    }

    pub fn tick_timer(&mut self) -> Option<Event> {
        self.timer.tick()
    }

    pub fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    // ── Session ──────────────────────────────────────────────────────

    pub fn login(&mut self, email: &str, password: &str) -> Option<Event> {
        self.session.login(email, password)
    }

    pub fn logout(&mut self) -> Option<Event> {
        self.session.logout()
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    // ── Appearance & snapshots ───────────────────────────────────────

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn progress(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }
}
