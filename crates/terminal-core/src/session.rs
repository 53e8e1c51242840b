use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use terminal_platform::clock::Clock;
use terminal_platform::filesystem::FileSystem;

use crate::commands::{self, CommandContext, StatePatch};
use crate::tables::HOME_DIR;

/// Number of submitted lines kept for `history` and arrow-key recall
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Input,
    Output,
    Error,
    Success,
    Warning,
}

/// One entry of the scrollback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Unique for the lifetime of the session, never reused
    pub id: u64,
    pub kind: LineKind,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

/// Result of a tab-completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The pending input was replaced by the only matching command
    Unique(String),
    /// Several commands match; they were listed in the scrollback
    Ambiguous(Vec<String>),
    None,
}

/// Everything a single terminal instance remembers
#[derive(Debug, Clone)]
pub struct SessionState {
    pub current_directory: String,
    pub history: Vec<String>,
    /// Position while browsing history with the arrow keys; `None` when not browsing
    pub history_index: Option<usize>,
    pub scrollback: Vec<Line>,
    pub active: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_directory: HOME_DIR.to_string(),
            history: Vec::new(),
            history_index: None,
            scrollback: Vec::new(),
            active: true,
        }
    }
}

/// A simulated terminal session: feeds submitted lines through the command
/// table and applies what the commands ask for.
pub struct Session {
    state: SessionState,
    next_line_id: u64,
    history_limit: usize,
    fs: Box<dyn FileSystem>,
    clock: Box<dyn Clock>,
}

impl Session {
    pub fn new(fs: Box<dyn FileSystem>, clock: Box<dyn Clock>) -> Self {
        Self {
            state: SessionState::default(),
            next_line_id: 0,
            history_limit: DEFAULT_HISTORY_LIMIT,
            fs,
            clock,
        }
    }

    /// Keep at most `limit` history entries (at least one)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_directory(&self) -> &str {
        &self.state.current_directory
    }

    pub fn history(&self) -> &[String] {
        &self.state.history
    }

    pub fn scrollback(&self) -> &[Line] {
        &self.state.scrollback
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn prompt(&self) -> String {
        format!("{} $ ", self.state.current_directory)
    }

    /// Run one submitted line and return the lines it appended.
    ///
    /// Blank input and input after `exit` are ignored entirely. After `clear`
    /// the returned slice is empty because the scrollback itself is.
    pub fn execute(&mut self, raw: &str) -> &[Line] {
        let line = raw.trim();
        if !self.state.active || line.is_empty() {
            return &[];
        }

        let mut start = self.state.scrollback.len();
        self.record_history(line);
        self.push_line(LineKind::Input, line);

        let mut parts = line.split(' ');
        let name = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();
        debug!(
            "executing {:?} with {} args in {}",
            name,
            args.len(),
            self.state.current_directory
        );

        let ctx = CommandContext {
            cwd: &self.state.current_directory,
            history: &self.state.history,
            fs: self.fs.as_ref(),
            clock: self.clock.as_ref(),
        };
        let outcome = commands::dispatch(&ctx, &name, &args);

        match outcome.patch {
            Some(StatePatch::ChangeDirectory(dir)) => {
                debug!("cwd {} -> {}", self.state.current_directory, dir);
                self.state.current_directory = dir;
            }
            Some(StatePatch::ClearScrollback) => {
                self.state.scrollback.clear();
                start = 0;
            }
            Some(StatePatch::Deactivate) => {
                info!("terminal session ended by exit");
                self.state.active = false;
            }
            None => {}
        }

        for (kind, text) in outcome.lines {
            self.push_line(kind, text);
        }

        &self.state.scrollback[start..]
    }

    fn record_history(&mut self, line: &str) {
        self.state.history.push(line.to_string());
        let excess = self.state.history.len().saturating_sub(self.history_limit);
        if excess > 0 {
            self.state.history.drain(..excess);
        }
        self.state.history_index = None;
    }

    /// Append a line to the scrollback, e.g. boot messages or status badges
    pub fn push_line(&mut self, kind: LineKind, text: impl Into<String>) -> &Line {
        let line = Line {
            id: self.next_line_id,
            kind,
            text: text.into(),
            timestamp: self.clock.now(),
        };
        self.next_line_id += 1;
        self.state.scrollback.push(line);
        &self.state.scrollback[self.state.scrollback.len() - 1]
    }

    /// Step back through history, replacing the pending input.
    /// Stops at the oldest entry.
    pub fn history_previous(&mut self, pending: &mut String) {
        let history = &self.state.history;
        if !self.state.active || history.is_empty() {
            return;
        }
        let index = match self.state.history_index {
            None => history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.state.history_index = Some(index);
        *pending = history[index].clone();
    }

    /// Step forward through history. Moving past the newest entry leaves
    /// history browsing and empties the pending input.
    pub fn history_next(&mut self, pending: &mut String) {
        if !self.state.active {
            return;
        }
        let Some(index) = self.state.history_index else {
            return;
        };
        let next = index + 1;
        if next >= self.state.history.len() {
            self.state.history_index = None;
            pending.clear();
        } else {
            self.state.history_index = Some(next);
            *pending = self.state.history[next].clone();
        }
    }

    /// Complete the pending input against the command names
    pub fn complete(&mut self, pending: &mut String) -> Completion {
        if !self.state.active {
            return Completion::None;
        }
        let prefix = pending.to_lowercase();
        let matches: Vec<String> = commands::command_names()
            .filter(|name| name.starts_with(&prefix))
            .map(String::from)
            .collect();

        match matches.len() {
            0 => Completion::None,
            1 => {
                *pending = matches[0].clone();
                Completion::Unique(matches[0].clone())
            }
            _ => {
                self.push_line(LineKind::Output, matches.join("  "));
                Completion::Ambiguous(matches)
            }
        }
    }

    /// Ctrl+L: wipe the screen but keep history and directory
    pub fn clear_screen(&mut self) {
        if self.state.active {
            self.state.scrollback.clear();
        }
    }

    /// Start over as if freshly mounted. Line ids keep counting up.
    pub fn reset(&mut self) {
        info!("terminal session reset");
        self.state = SessionState::default();
    }
}
