//! Interactive shell over the core `App`.
//!
//! Stdin lines are user intents; a 1-second interval drives the pomodoro
//! tick while the shell is alive. Dropping out of the loop drops the
//! interval, so no recurring callback survives the shell.

use std::ops::ControlFlow;

use tokio::io::{AsyncBufReadExt, BufReader};
use todoquest_core::{
    App, Event, Priority, TaskDraft, TaskFilter, TaskView, Theme, UnavailableSpeech,
    MOTIVATIONAL_QUOTE,
};

pub async fn run(app: App) -> Result<(), Box<dyn std::error::Error>> {
    let mut shell = Shell::new(app);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(std::time::Duration::from_secs(1));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    println!("todoquest -- {MOTIVATIONAL_QUOTE}");
    println!("type 'help' for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if shell.handle_line(&line).is_break() {
                            break;
                        }
                    }
                    // EOF: scriptable exit.
                    None => break,
                }
            }
            _ = tick.tick() => {
                if let Some(Event::TimerFinished { .. }) = shell.app.tick_timer() {
                    println!("pomodoro finished -- take a break");
                }
            }
        }
    }
    Ok(())
}

struct Shell {
    app: App,
    filter: TaskFilter,
    search: String,
    /// Staged task text from `suggest` or `voice`, consumed by a bare `add`.
    pending: Option<String>,
}

impl Shell {
    fn new(app: App) -> Self {
        Shell {
            app,
            filter: TaskFilter::All,
            search: String::new(),
            pending: None,
        }
    }

    fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        let line = line.trim();
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "quit" | "exit" => return ControlFlow::Break(()),
            "help" => print_help(),
            "login" => self.login(rest),
            "logout" => {
                if self.app.logout().is_some() {
                    println!("logged out");
                } else {
                    println!("not logged in");
                }
            }
            _ if !self.app.session().is_logged_in() => {
                println!("please login first: login <email> <password>");
            }
            "add" => self.add(rest),
            "list" => self.list(),
            "toggle" => self.toggle(rest),
            "rm" => self.remove(rest),
            "note" => self.note(rest),
            "prio" => self.prio(rest),
            "filter" => self.set_filter(rest),
            "search" => {
                self.search = rest.to_string();
                self.list();
            }
            "timer" => self.timer(rest),
            "stats" => self.stats(),
            "theme" => self.theme(rest),
            "suggest" => {
                let text = self.app.suggest_task().to_string();
                println!("suggestion staged: {text}");
                self.pending = Some(text);
            }
            "voice" => match self.app.voice_input(&UnavailableSpeech) {
                Some(text) => {
                    println!("heard: {text}");
                    self.pending = Some(text);
                }
                None => println!("voice input is not available here"),
            },
            other => println!("unknown command '{other}' (try 'help')"),
        }
        ControlFlow::Continue(())
    }

    fn login(&mut self, rest: &str) {
        let mut parts = rest.split_whitespace();
        let email = parts.next().unwrap_or_default();
        let password = parts.next().unwrap_or_default();
        match self.app.login(email, password) {
            Some(Event::LoggedIn { user, .. }) => println!("welcome, {user}"),
            _ => println!("login needs a non-empty email and password"),
        }
    }

    /// `add <text> [| notes [| subtask, subtask]]`, or bare `add` to
    /// consume staged suggest/voice text.
    fn add(&mut self, rest: &str) {
        let mut sections = rest.splitn(3, '|').map(str::trim);
        let text = match sections.next().filter(|t| !t.is_empty()) {
            Some(text) => text.to_string(),
            None => match self.pending.take() {
                Some(text) => text,
                None => {
                    println!("nothing to add");
                    return;
                }
            },
        };
        let mut draft = TaskDraft::new(text);
        if let Some(notes) = sections.next() {
            draft = draft.notes(notes);
        }
        if let Some(subtasks) = sections.next() {
            draft = draft.subtasks(
                subtasks
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            );
        }
        match self.app.add_task(draft) {
            Some(Event::TaskAdded { text, deadline, .. }) => {
                match deadline {
                    Some(d) => println!("added: {text} (due {})", d.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")),
                    None => println!("added: {text}"),
                }
            }
            _ => println!("nothing to add"),
        }
    }

    fn list(&mut self) {
        let views = self.app.visible_tasks(self.filter, &self.search);
        if views.is_empty() {
            println!("no tasks");
            return;
        }
        for (i, view) in views.iter().enumerate() {
            println!("{}", render_task(i + 1, view));
        }
    }

    fn toggle(&mut self, rest: &str) {
        let Some(id) = self.resolve(rest) else {
            println!("no task matches '{rest}'");
            return;
        };
        match self.app.toggle_task(&id) {
            Ok(events) => {
                for event in events {
                    match event {
                        Event::TaskCompleted { xp_awarded, .. } => {
                            println!("done (+{xp_awarded} xp)")
                        }
                        Event::TaskReopened { .. } => println!("reopened"),
                        Event::GoalReached { streak, .. } => {
                            println!("daily goal reached! streak: {streak}")
                        }
                        Event::AchievementUnlocked { title, .. } => {
                            println!("achievement unlocked: {title}")
                        }
                        _ => {}
                    }
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    fn remove(&mut self, rest: &str) {
        let Some(id) = self.resolve(rest) else {
            println!("no task matches '{rest}'");
            return;
        };
        match self.app.remove_task(&id) {
            Ok(_) => println!("removed"),
            Err(e) => println!("{e}"),
        }
    }

    fn note(&mut self, rest: &str) {
        let (target, notes) = match rest.split_once(char::is_whitespace) {
            Some((t, n)) => (t, n.trim()),
            None => (rest, ""),
        };
        match self.resolve(target) {
            Some(id) => {
                if let Err(e) = self.app.set_task_notes(&id, notes) {
                    println!("{e}");
                } else {
                    println!("noted");
                }
            }
            None => println!("no task matches '{target}'"),
        }
    }

    fn prio(&mut self, rest: &str) {
        let (target, level) = match rest.split_once(char::is_whitespace) {
            Some((t, l)) => (t, l.trim()),
            None => {
                println!("usage: prio <task> low|medium|high");
                return;
            }
        };
        let priority = match level.to_lowercase().as_str() {
            "low" => Priority::Low,
            "medium" | "med" => Priority::Medium,
            "high" => Priority::High,
            other => {
                println!("unknown priority '{other}'");
                return;
            }
        };
        match self.resolve(target) {
            Some(id) => {
                if let Err(e) = self.app.set_task_priority(&id, priority) {
                    println!("{e}");
                } else {
                    println!("priority set to {priority}");
                }
            }
            None => println!("no task matches '{target}'"),
        }
    }

    fn set_filter(&mut self, rest: &str) {
        match rest.parse::<TaskFilter>() {
            Ok(filter) => {
                self.filter = filter;
                self.list();
            }
            Err(e) => println!("{e}"),
        }
    }

    fn timer(&mut self, rest: &str) {
        match rest {
            "start" => match self.app.start_timer() {
                Some(_) => println!("timer running"),
                None => println!("timer already running or exhausted (try 'timer reset')"),
            },
            "pause" => match self.app.pause_timer() {
                Some(Event::TimerPaused { remaining_secs, .. }) => {
                    println!("paused at {}", format_clock(remaining_secs))
                }
                _ => println!("timer is not running"),
            },
            "reset" => {
                self.app.reset_timer();
                println!("timer reset to {}", format_clock(self.app.timer().remaining_secs()));
            }
            "status" | "" => {
                match serde_json::to_string_pretty(&self.app.timer().snapshot()) {
                    Ok(json) => println!("{json}"),
                    Err(e) => println!("{e}"),
                }
            }
            other => println!("unknown timer command '{other}'"),
        }
    }

    fn stats(&self) {
        let snapshot = self.app.progress();
        println!(
            "streak: {} | xp: {} | daily goal: {}/{}",
            snapshot.streak, snapshot.xp, snapshot.completed_today, snapshot.daily_goal
        );
        for achievement in &snapshot.achievements {
            let mark = if achievement.unlocked { "x" } else { " " };
            println!("  [{mark}] {}", achievement.title);
        }
    }

    fn theme(&mut self, rest: &str) {
        match rest.parse::<Theme>() {
            Ok(theme) => {
                self.app.set_theme(theme);
                println!("theme set");
            }
            Err(e) => println!("{e}"),
        }
    }

    /// Resolve user input to a task id: a 1-based position in the current
    /// visible list, or an id prefix. Mutations themselves are always
    /// id-keyed.
    fn resolve(&self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Ok(position) = input.parse::<usize>() {
            let views = self.app.visible_tasks(self.filter, &self.search);
            return views
                .get(position.checked_sub(1)?)
                .map(|v| v.task.id.clone());
        }
        self.app
            .store()
            .iter()
            .find(|t| t.id.starts_with(input))
            .map(|t| t.id.clone())
    }
}

fn render_task(position: usize, view: &TaskView<'_>) -> String {
    let task = view.task;
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("{position:>3}. [{mark}] {} ({})", task.text, task.priority);
    if let Some(deadline) = task.deadline {
        line.push_str(&format!(" due {}", deadline.format("%Y-%m-%d %H:%M")));
    }
    if view.overdue {
        line.push_str(" OVERDUE");
    }
    if !task.notes.is_empty() {
        line.push_str(&format!("\n       {}", task.notes));
    }
    for subtask in &task.subtasks {
        let mark = if subtask.completed { "x" } else { " " };
        line.push_str(&format!("\n       [{mark}] {}", subtask.text));
    }
    line
}

fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn print_help() {
    println!(
        "commands:\n  \
         login <email> <password> / logout\n  \
         add <text> [| notes [| subtask, subtask]]\n  \
         list / filter all|completed|pending / search [query]\n  \
         toggle <n|id> / rm <n|id> / note <n|id> <text> / prio <n|id> <level>\n  \
         timer start|pause|reset|status\n  \
         stats / theme light|dark|ocean|forest / suggest / voice\n  \
         quit"
    );
}
