use terminal_core::session::{Line, LineKind};

const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Turns scrollback lines into text for a real terminal
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn style(kind: LineKind) -> Option<&'static str> {
        match kind {
            LineKind::Input => Some("\x1b[97m"),
            LineKind::Error => Some("\x1b[31m"),
            LineKind::Success => Some("\x1b[32m"),
            LineKind::Warning => Some("\x1b[33m"),
            LineKind::Output => None,
        }
    }

    fn paint(&self, kind: LineKind, text: &str) -> String {
        match Self::style(kind) {
            Some(code) if self.color => format!("{}{}{}", code, text, RESET),
            _ => text.to_string(),
        }
    }

    /// Input lines are shown after the prompt they were typed at
    pub fn line(&self, line: &Line, prompt: &str) -> String {
        match line.kind {
            LineKind::Input => {
                format!("{}{}", self.prompt(prompt), self.paint(line.kind, &line.text))
            }
            kind => self.paint(kind, &line.text),
        }
    }

    pub fn prompt(&self, prompt: &str) -> String {
        if self.color {
            format!("\x1b[34m{}{}", prompt, RESET)
        } else {
            prompt.to_string()
        }
    }

    /// Wipes the visible terminal; plain output has nothing to wipe
    pub fn clear(&self) -> &'static str {
        if self.color {
            CLEAR_SCREEN
        } else {
            ""
        }
    }

    pub fn badge(&self, text: &str) -> String {
        if self.color {
            format!("\x1b[2m{}{}", text, RESET)
        } else {
            text.to_string()
        }
    }
}
