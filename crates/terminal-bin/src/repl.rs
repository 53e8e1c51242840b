//! Line-based front end for a [`Session`].
//!
//! A cooked-mode terminal hands us whole lines, so the browser's live input box
//! becomes a staged buffer: arrow-key escapes and a trailing TAB edit the
//! buffer, and an empty line submits it.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::{debug, info};

use terminal_core::boot::{self, BOOT_MESSAGES};
use terminal_core::config::TerminalConfig;
use terminal_core::network::{self, IpifyLookup};
use terminal_core::session::{Completion, Line, LineKind, Session};

use crate::render::Renderer;

const ARROW_UP: &str = "\x1b[A";
const ARROW_DOWN: &str = "\x1b[B";
const FORM_FEED: &str = "\x0c";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrow {
    Up,
    Down,
}

#[derive(Debug, PartialEq, Eq)]
enum InputEvent<'a> {
    History(Vec<Arrow>),
    Complete(&'a str),
    ClearScreen,
    Submit(&'a str),
}

fn parse_arrows(raw: &str) -> Option<Vec<Arrow>> {
    let mut rest = raw;
    let mut arrows = Vec::new();
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix(ARROW_UP) {
            arrows.push(Arrow::Up);
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix(ARROW_DOWN) {
            arrows.push(Arrow::Down);
            rest = tail;
        } else {
            return None;
        }
    }
    (!arrows.is_empty()).then_some(arrows)
}

fn classify(raw: &str) -> InputEvent<'_> {
    if raw == FORM_FEED {
        return InputEvent::ClearScreen;
    }
    if let Some(arrows) = parse_arrows(raw) {
        return InputEvent::History(arrows);
    }
    if let Some(text) = raw.strip_suffix('\t') {
        return InputEvent::Complete(text.trim_end_matches('\t'));
    }
    InputEvent::Submit(raw)
}

/// What the terminal should show after one line of input
#[derive(Debug, Default)]
pub struct Reaction {
    /// Lines appended to the scrollback, each with the prompt it belongs to
    pub lines: Vec<(Line, String)>,
    /// Staged input to show after the next prompt
    pub staged: Option<String>,
    /// The scrollback was wiped, so the visible screen must be too
    pub cleared: bool,
}

/// Owns the session and the staged input buffer
pub struct Controller {
    session: Session,
    pending: String,
}

impl Controller {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            pending: String::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    pub fn feed(&mut self, raw: &str) -> Reaction {
        if !self.session.is_active() {
            return Reaction::default();
        }

        match classify(raw) {
            InputEvent::ClearScreen => {
                self.session.clear_screen();
                Reaction {
                    cleared: true,
                    ..Reaction::default()
                }
            }
            InputEvent::History(arrows) => {
                for arrow in arrows {
                    match arrow {
                        Arrow::Up => self.session.history_previous(&mut self.pending),
                        Arrow::Down => self.session.history_next(&mut self.pending),
                    }
                }
                self.staged()
            }
            InputEvent::Complete(text) => {
                self.pending = text.to_string();
                let listed = match self.session.complete(&mut self.pending) {
                    Completion::Ambiguous(_) => self.session.scrollback().last().cloned(),
                    Completion::Unique(_) | Completion::None => None,
                };
                let mut reaction = self.staged();
                reaction.lines.extend(listed.map(|l| (l, String::new())));
                reaction
            }
            InputEvent::Submit(text) => {
                let line = if text.trim().is_empty() {
                    std::mem::take(&mut self.pending)
                } else {
                    self.pending.clear();
                    text.to_string()
                };
                let prompt = self.session.prompt();
                let lines = self
                    .session
                    .execute(&line)
                    .iter()
                    .map(|l| (l.clone(), prompt.clone()))
                    .collect();
                // anything executed leaves at least its input line behind, except `clear`
                let cleared = !line.trim().is_empty() && self.session.scrollback().is_empty();
                Reaction {
                    lines,
                    staged: None,
                    cleared,
                }
            }
        }
    }

    fn staged(&self) -> Reaction {
        Reaction {
            lines: Vec::new(),
            staged: Some(self.pending.clone()),
            cleared: false,
        }
    }
}

fn print_prompt(
    out: &mut impl Write,
    renderer: &Renderer,
    prompt: &str,
    staged: &str,
) -> Result<()> {
    write!(out, "{}{}", renderer.prompt(prompt), staged)?;
    out.flush()?;
    Ok(())
}

async fn play_boot(controller: &mut Controller, renderer: &Renderer, speed: f64) -> Result<()> {
    let mut out = std::io::stdout();
    tokio::time::sleep(boot::scaled_delay(boot::INITIAL_DELAY_MS, speed)).await;
    for message in BOOT_MESSAGES {
        tokio::time::sleep(boot::scaled_delay(message.delay_ms, speed)).await;
        let line = controller
            .session_mut()
            .push_line(boot::boot_line_kind(message.content), message.content);
        writeln!(out, "{}", renderer.line(line, ""))?;
    }
    // The handshake is transient; the session starts with an empty screen.
    controller.session_mut().clear_screen();
    write!(out, "{}", renderer.clear())?;
    writeln!(out)?;
    Ok(())
}

/// Interactive loop over stdin until `exit`, EOF or Ctrl+C
pub async fn run(mut controller: Controller, config: &TerminalConfig) -> Result<()> {
    let renderer = Renderer::new(config.color);

    let (ip_tx, mut ip_rx) = oneshot::channel::<String>();
    let mut ip_pending = config.ip_lookup_enabled;
    if config.ip_lookup_enabled {
        let lookup = IpifyLookup::new(config.ip_lookup_url.clone());
        let timeout = config.ip_lookup_timeout();
        let fallback = config.ip_fallback.clone();
        tokio::spawn(async move {
            let ip = network::resolve_ip(&lookup, timeout, &fallback).await;
            let _ = ip_tx.send(ip);
        });
    } else {
        drop(ip_tx);
    }

    if config.boot_sequence {
        play_boot(&mut controller, &renderer, config.boot_speed).await?;
    }

    let mut out = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut staged = String::new();
    print_prompt(&mut out, &renderer, &controller.prompt(), &staged)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    info!("stdin closed, leaving terminal");
                    break;
                };
                let reaction = controller.feed(&line);
                if reaction.cleared {
                    write!(out, "{}", renderer.clear())?;
                }
                for (line, _) in &reaction.lines {
                    // the terminal already echoed what was typed
                    if line.kind != LineKind::Input {
                        writeln!(out, "{}", renderer.line(line, ""))?;
                    }
                }
                if !controller.is_active() {
                    break;
                }
                staged = reaction.staged.unwrap_or_default();
                print_prompt(&mut out, &renderer, &controller.prompt(), &staged)?;
            }
            ip = &mut ip_rx, if ip_pending => {
                ip_pending = false;
                if let Ok(ip) = ip {
                    debug!("ip badge resolved to {}", ip);
                    writeln!(out, "\r{}", renderer.badge(&network::badge_line(&ip)))?;
                    print_prompt(&mut out, &renderer, &controller.prompt(), &staged)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("received Ctrl+C, shutting down");
                writeln!(out)?;
                break;
            }
        }
    }

    Ok(())
}

/// Run `lines` through the controller without a tty and write what they produce
pub fn run_script(
    mut controller: Controller,
    lines: &[String],
    renderer: &Renderer,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    for raw in lines {
        if !controller.is_active() {
            debug!("session ended, skipping {:?}", raw);
            continue;
        }
        let reaction = controller.feed(raw);
        if json {
            continue;
        }
        if reaction.cleared {
            write!(out, "{}", renderer.clear())?;
        }
        for (line, prompt) in &reaction.lines {
            writeln!(out, "{}", renderer.line(line, prompt))?;
        }
    }

    if json {
        let data = serde_json::to_string_pretty(controller.session().scrollback())
            .context("failed to encode scrollback")?;
        writeln!(out, "{}", data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use terminal_core::mockfs::MockFileSystem;
    use terminal_platform::clock::SystemClock;

    fn controller() -> Controller {
        Controller::new(Session::new(
            Box::new(MockFileSystem::new()),
            Box::new(SystemClock),
        ))
    }

    fn texts(reaction: &Reaction) -> Vec<&str> {
        reaction.lines.iter().map(|(l, _)| l.text.as_str()).collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            classify("\x1b[A\x1b[A"),
            InputEvent::History(vec![Arrow::Up, Arrow::Up])
        );
        assert_eq!(classify("\x1b[B"), InputEvent::History(vec![Arrow::Down]));
        assert_eq!(classify("ne\t"), InputEvent::Complete("ne"));
        assert_eq!(classify("\x0c"), InputEvent::ClearScreen);
        assert_eq!(classify("ls -la"), InputEvent::Submit("ls -la"));
        assert_eq!(classify("\x1b[Als"), InputEvent::Submit("\x1b[Als"));
        assert_eq!(classify(""), InputEvent::Submit(""));
    }

    #[test]
    fn test_submit_records_prompt_of_the_moment() {
        let mut c = controller();
        let reaction = c.feed("cd projects");
        assert_eq!(reaction.lines[0].1, "/home/yflong $ ");
        assert_eq!(c.prompt(), "/home/yflong/projects $ ");
    }

    #[test]
    fn test_arrow_recall_then_empty_line_submits() {
        let mut c = controller();
        c.feed("pwd");
        c.feed("whoami");

        let reaction = c.feed("\x1b[A\x1b[A");
        assert_eq!(reaction.staged.as_deref(), Some("pwd"));
        assert!(reaction.lines.is_empty());

        let reaction = c.feed("");
        assert_eq!(texts(&reaction), vec!["pwd", "/home/yflong"]);
        assert_eq!(c.session().history(), ["pwd", "whoami", "pwd"]);
    }

    #[test]
    fn test_arrow_down_past_newest_clears_stage() {
        let mut c = controller();
        c.feed("pwd");
        c.feed("\x1b[A");
        let reaction = c.feed("\x1b[B");
        assert_eq!(reaction.staged.as_deref(), Some(""));
        assert!(c.feed("").lines.is_empty());
    }

    #[test]
    fn test_typed_line_wins_over_stage() {
        let mut c = controller();
        c.feed("pwd");
        c.feed("\x1b[A");
        let reaction = c.feed("whoami");
        assert_eq!(texts(&reaction), vec!["whoami", "Yunfeng Long"]);
        assert!(c.feed("").lines.is_empty());
    }

    #[test]
    fn test_tab_completion() {
        let mut c = controller();
        let reaction = c.feed("neo\t");
        assert_eq!(reaction.staged.as_deref(), Some("neofetch"));
        assert!(reaction.lines.is_empty());

        let reaction = c.feed("u\t");
        assert_eq!(reaction.staged.as_deref(), Some("u"));
        assert_eq!(texts(&reaction), vec!["uname  uptime"]);
    }

    #[test]
    fn test_ctrl_l_clears_scrollback() {
        let mut c = controller();
        c.feed("ls");
        assert!(c.feed("\x0c").cleared);
        assert!(c.session().scrollback().is_empty());
        assert_eq!(c.session().history(), ["ls"]);
    }

    #[test]
    fn test_clear_command_reports_cleared() {
        let mut c = controller();
        assert!(!c.feed("ls").cleared);
        assert!(c.feed("clear").cleared);

        // submitting nothing on an already empty screen is not a clear
        assert!(!c.feed("").cleared);
        assert!(!c.feed("pwd").cleared);

        c.feed("\x1b[A");
        assert!(!c.feed("").cleared);
        c.feed("clear");
        c.feed("\x1b[A");
        assert!(c.feed("").cleared);
    }

    #[test]
    fn test_input_ignored_after_exit() {
        let mut c = controller();
        c.feed("exit");
        assert!(!c.is_active());
        assert!(c.feed("ls").lines.is_empty());
        assert!(c.feed("\x1b[A").staged.is_none());
    }

    fn script(lines: &[&str], json: bool) -> String {
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        let mut out = Vec::new();
        run_script(controller(), &lines, &Renderer::new(false), json, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_run_script_plain() {
        let out = script(&["pwd", "exit", "ls"], false);
        assert_eq!(
            out,
            "/home/yflong $ pwd\n\
             /home/yflong\n\
             /home/yflong $ exit\n\
             Terminal session ended. Refresh page to restart.\n"
        );
    }

    #[test]
    fn test_run_script_plain_clear() {
        let out = script(&["pwd", "clear", "whoami"], false);
        assert_eq!(
            out,
            "/home/yflong $ pwd\n/home/yflong\n/home/yflong $ whoami\nYunfeng Long\n"
        );
    }

    #[test]
    fn test_run_script_json() {
        let out = script(&["cd nowhere", "exit", "ls"], true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let lines = value.as_array().unwrap();

        let kinds: Vec<&str> = lines.iter().map(|l| l["kind"].as_str().unwrap()).collect();
        assert_eq!(kinds, vec!["input", "error", "input", "warning"]);

        let texts: Vec<&str> = lines.iter().map(|l| l["text"].as_str().unwrap()).collect();
        assert_eq!(texts[0], "cd nowhere");
        assert_eq!(texts[2], "exit");
        assert!(!texts.contains(&"ls"));

        let ids: Vec<u64> = lines.iter().map(|l| l["id"].as_u64().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(lines.iter().all(|l| l["timestamp"].is_string()));
    }
}
