//! The fixed command table.
//!
//! Every command is a plain function from the session snapshot and its
//! arguments to an [`Outcome`]: the lines to print plus at most one change to
//! apply to the session. Handlers never touch the session directly, so a
//! failing command cannot leave it half-updated.

use terminal_platform::clock::Clock;
use terminal_platform::filesystem::{DirectoryEntry, EntryKind, FileSystem};

use crate::error::CommandError;
use crate::format;
use crate::session::LineKind;
use crate::tables::{self, HOME_DIR};

/// Read-only view of the session handed to every command
pub struct CommandContext<'a> {
    pub cwd: &'a str,
    pub history: &'a [String],
    pub fs: &'a dyn FileSystem,
    pub clock: &'a dyn Clock,
}

/// Session mutation requested by a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatePatch {
    ChangeDirectory(String),
    ClearScrollback,
    Deactivate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub lines: Vec<(LineKind, String)>,
    pub patch: Option<StatePatch>,
}

impl Outcome {
    pub fn line(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            lines: vec![(kind, text.into())],
            patch: None,
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self::line(LineKind::Output, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::line(LineKind::Success, text)
    }

    pub fn error(err: &CommandError) -> Self {
        Self::line(LineKind::Error, err.to_string())
    }

    fn with_patch(mut self, patch: StatePatch) -> Self {
        self.patch = Some(patch);
        self
    }
}

pub type Handler = fn(&CommandContext<'_>, &[&str]) -> Result<Outcome, CommandError>;

const COMMANDS: &[(&str, Handler)] = &[
    ("help", help),
    ("ls", ls),
    ("pwd", pwd),
    ("cd", cd),
    ("cat", cat),
    ("whoami", whoami),
    ("date", date),
    ("uname", uname),
    ("ps", ps),
    ("top", top),
    ("free", free),
    ("df", df),
    ("uptime", uptime),
    ("clear", clear),
    ("history", history),
    ("echo", echo),
    ("mkdir", mkdir),
    ("touch", touch),
    ("rm", rm),
    ("tree", tree),
    ("neofetch", neofetch),
    ("exit", exit),
];

/// Command names in table order, which is also tab-completion order
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|(name, _)| *name)
}

/// Exact-name lookup; no prefix matching
pub fn lookup(name: &str) -> Option<Handler> {
    COMMANDS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, handler)| *handler)
}

/// Run `name` against the context. Failures come back as a single error line.
pub fn dispatch(ctx: &CommandContext<'_>, name: &str, args: &[&str]) -> Outcome {
    let result = match lookup(name) {
        Some(handler) => handler(ctx, args),
        None => Err(CommandError::NotFound(name.to_string())),
    };
    result.unwrap_or_else(|e| Outcome::error(&e))
}

fn has_flag(args: &[&str], flags: &[&str]) -> bool {
    args.iter().any(|a| flags.contains(a))
}

fn help(_ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(tables::HELP_TEXT))
}

fn ls(ctx: &CommandContext<'_>, args: &[&str]) -> Result<Outcome, CommandError> {
    let entries = ctx.fs.list_dir(ctx.cwd).unwrap_or(&[]);
    if entries.is_empty() {
        return Ok(Outcome::output("Directory is empty"));
    }

    let long = has_flag(args, &["-l", "-la"]);
    let show_hidden = has_flag(args, &["-la", "-a"]);

    let visible: Vec<&DirectoryEntry> = entries
        .iter()
        .filter(|e| show_hidden || !e.is_hidden())
        .collect();

    if long {
        let mut lines = Vec::with_capacity(visible.len() + 1);
        lines.push((LineKind::Output, format!("total {}", visible.len())));
        lines.extend(
            visible
                .iter()
                .map(|e| (LineKind::Output, format::long_listing_line(e))),
        );
        return Ok(Outcome { lines, patch: None });
    }

    let names: Vec<String> = visible
        .iter()
        .map(|e| match e.kind {
            EntryKind::Directory => format!("{}/", e.name),
            EntryKind::File => e.name.clone(),
        })
        .collect();
    Ok(Outcome::output(names.join("  ")))
}

fn pwd(ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(ctx.cwd))
}

fn change_dir(path: &str, message: impl Into<String>) -> Outcome {
    Outcome::success(message).with_patch(StatePatch::ChangeDirectory(path.to_string()))
}

fn cd(ctx: &CommandContext<'_>, args: &[&str]) -> Result<Outcome, CommandError> {
    let target = match args.first() {
        None | Some(&"~") => return Ok(change_dir(HOME_DIR, "Changed to home directory")),
        Some(target) => *target,
    };

    if target == ".." {
        let mut parts: Vec<&str> = ctx.cwd.split('/').filter(|p| !p.is_empty()).collect();
        // Climbing out of the home directory lands on the root, never on `/home`
        if parts.len() > 2 {
            parts.pop();
            let parent = format!("/{}", parts.join("/"));
            return Ok(change_dir(&parent, format!("Changed to {}", parent)));
        }
        return Ok(change_dir("/", "Changed to root directory"));
    }

    if target.starts_with('/') {
        if ctx.fs.has_dir(target) {
            return Ok(change_dir(target, format!("Changed to {}", target)));
        }
        return Err(CommandError::NoSuchDirectory(target.to_string()));
    }

    let new_path = if ctx.cwd == "/" {
        format!("/{}", target)
    } else {
        format!("{}/{}", ctx.cwd, target)
    };
    let listed_dir = ctx
        .fs
        .entry(ctx.cwd, target)
        .is_some_and(DirectoryEntry::is_dir);

    if ctx.fs.has_dir(&new_path) || listed_dir {
        Ok(change_dir(&new_path, format!("Changed to {}", new_path)))
    } else {
        Err(CommandError::NoSuchDirectory(target.to_string()))
    }
}

fn cat(ctx: &CommandContext<'_>, args: &[&str]) -> Result<Outcome, CommandError> {
    let name = *args.first().ok_or(CommandError::MissingFileOperand("cat"))?;

    let is_file = ctx
        .fs
        .entry(ctx.cwd, name)
        .is_some_and(|e| e.kind == EntryKind::File);
    if !is_file {
        return Err(CommandError::NoSuchFile(name.to_string()));
    }

    Ok(match tables::file_content(name) {
        Some(content) => Outcome::output(content),
        None => Outcome::output(tables::unauthorized_placeholder(name)),
    })
}

fn whoami(_ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(tables::DISPLAY_NAME))
}

fn date(ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(format::full_date(&ctx.clock.now())))
}

fn uname(_ctx: &CommandContext<'_>, args: &[&str]) -> Result<Outcome, CommandError> {
    if has_flag(args, &["-a"]) {
        Ok(Outcome::output(tables::UNAME_ALL))
    } else {
        Ok(Outcome::output(tables::UNAME))
    }
}

fn ps(_ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(tables::PS))
}

fn top(ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(tables::top(&format::clock_time(
        &ctx.clock.now(),
    ))))
}

fn free(_ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(tables::FREE))
}

fn df(_ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(tables::DF))
}

fn uptime(ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(tables::uptime(&format::clock_time(
        &ctx.clock.now(),
    ))))
}

fn clear(_ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::default().with_patch(StatePatch::ClearScrollback))
}

fn history(ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    let lines = ctx
        .history
        .iter()
        .enumerate()
        .map(|(i, cmd)| (LineKind::Output, format!("{:>4} {}", i + 1, cmd)))
        .collect();
    Ok(Outcome { lines, patch: None })
}

fn echo(_ctx: &CommandContext<'_>, args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(args.join(" ")))
}

fn mkdir(_ctx: &CommandContext<'_>, args: &[&str]) -> Result<Outcome, CommandError> {
    let name = args.first().ok_or(CommandError::MissingOperand("mkdir"))?;
    Ok(Outcome::success(format!(
        "Directory '{}' created successfully",
        name
    )))
}

fn touch(_ctx: &CommandContext<'_>, args: &[&str]) -> Result<Outcome, CommandError> {
    let name = args
        .first()
        .ok_or(CommandError::MissingFileOperand("touch"))?;
    Ok(Outcome::success(format!("File '{}' created successfully", name)))
}

fn rm(_ctx: &CommandContext<'_>, args: &[&str]) -> Result<Outcome, CommandError> {
    let name = args.first().ok_or(CommandError::MissingOperand("rm"))?;
    Ok(Outcome::success(format!("File '{}' removed successfully", name)))
}

fn tree(ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(tables::tree(ctx.cwd)))
}

fn neofetch(_ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::output(tables::NEOFETCH))
}

fn exit(_ctx: &CommandContext<'_>, _args: &[&str]) -> Result<Outcome, CommandError> {
    Ok(Outcome::line(
        LineKind::Warning,
        "Terminal session ended. Refresh page to restart.",
    )
    .with_patch(StatePatch::Deactivate))
}
