//! Pomodoro countdown timer.
//!
//! A caller-driven state machine: no internal thread, no interval of its
//! own. The owner calls `tick()` on a 1-second cadence while it wants the
//! clock to run, and cancels simply by dropping its interval. That keeps
//! cancellation guaranteed on every exit path.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Default pomodoro length: 25 minutes.
pub const DEFAULT_POMODORO_SECS: u32 = 25 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not counting down. Covers both "never started" and "paused".
    #[default]
    Paused,
    Running,
}

/// Single countdown with start/pause/reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroTimer {
    state: TimerState,
    /// Remaining time in seconds for the current run.
    remaining_secs: u32,
    /// Countdown length restored by `reset`.
    total_secs: u32,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(DEFAULT_POMODORO_SECS)
    }
}

impl PomodoroTimer {
    pub fn new(total_secs: u32) -> Self {
        PomodoroTimer {
            state: TimerState::Paused,
            remaining_secs: total_secs,
            total_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn snapshot(&self) -> Event {
        Event::TimerSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down. No-op when already running or when the
    /// countdown is exhausted (reset first).
    pub fn start(&mut self) -> Option<Event> {
        if self.state == TimerState::Running || self.remaining_secs == 0 {
            return None;
        }
        self.state = TimerState::Running;
        Some(Event::TimerStarted {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting down, keeping the remaining time. No-op unless running.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Restore the full countdown and stop. Valid from any state.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Paused;
        self.remaining_secs = self.total_secs;
        Some(Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance the clock by one second. Call on a 1-second cadence while
    /// running. Returns `TimerFinished` exactly once, when the countdown
    /// hits zero; the timer lands in `Paused` at that point.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Paused;
            return Some(Event::TimerFinished { at: Utc::now() });
        }
        None
    }
}
