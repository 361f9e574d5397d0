//! # Todoquest Core Library
//!
//! Core logic for todoquest, a gamified to-do list: task store, derived
//! views, XP/streak tracking, a pomodoro timer and a trivial session gate.
//! All task state lives in memory; only configuration touches disk. The
//! CLI shell is a thin presentation layer over this library.
//!
//! ## Architecture
//!
//! - **Task store**: id-keyed, insertion-ordered owner of the task list
//! - **Derived views**: pure filter/search/overdue queries, recomputed per call
//! - **Progress tracker**: XP, streak and achievement bookkeeping driven by
//!   completion events
//! - **Pomodoro timer**: caller-driven countdown state machine, the owner
//!   ticks it on a 1-second cadence
//!
//! ## Key Components
//!
//! - [`App`]: state container wiring the pieces together
//! - [`TaskStore`]: task list owner
//! - [`ProgressTracker`]: gamification counters
//! - [`PomodoroTimer`]: countdown state machine

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod nldate;
pub mod progress;
pub mod session;
pub mod speech;
pub mod task;
pub mod timer;
pub mod view;

pub use app::{App, MOTIVATIONAL_QUOTE};
pub use config::{Config, Language, Theme};
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use progress::{Achievement, ProgressSnapshot, ProgressTracker};
pub use session::SessionGate;
pub use speech::{SpeechCapture, UnavailableSpeech};
pub use task::{Priority, Subtask, Task, TaskDraft, TaskStore};
pub use timer::{PomodoroTimer, TimerState, DEFAULT_POMODORO_SECS};
pub use view::{is_overdue, visible_tasks, TaskFilter, TaskView};
