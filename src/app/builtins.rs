//! Built-in command handlers.
//!
//! Each handler is a pure function of the invocation and a read-only
//! `ShellContext`. Handlers never touch the scrollback; they return the
//! lines to print and an optional action for the interpreter to carry out.

use super::{Effect, ScheduledEffect};
use crate::config::NavigationConfig;
use crate::input::{Builtin, CommandInvocation};
use crate::model::file_table::{FileTable, VirtualFile};
use crate::model::profile::Profile;
use crate::services::time_source::TimeSource;

/// Lines shown by `head` and `tail`.
const PREVIEW_LINES: usize = 10;

const OS_NAME: &str = "FolioOS";
const OS_RELEASE: &str = "5.15.0-folio x86_64";

const HELP_TEXT: &str = "\
Available commands:

Profile:
  about, summary       Who I am
  experience, work     Work history
  projects             Side projects and research
  skills               Skills
  education            Education
  awards               Awards and recognition
  contact              How to reach me

Files:
  ls [-l|-la]          List files
  cat <file>           Print a file
  head <file>          First 10 lines of a file
  tail <file>          Last 10 lines of a file
  wc <file>            Line, word and character counts
  grep <term>          Search every file
  find <term>          Find files by name or content
  tree                 Show the directory tree

System:
  whoami               Print the session user
  pwd                  Print the working directory
  date                 Print the current date and time
  uname [-a]           Print system information
  history              List previous commands
  echo <text>          Print text
  clear                Clear the screen
  exit                 End the session

AI:
  /ask <question>      Ask the AI assistant about my background

Navigation:
  /portfolio           Switch to the visual portfolio";

/// Read-only state a handler may consult.
pub struct ShellContext<'a> {
    pub profile: &'a Profile,
    pub files: &'a FileTable,
    pub user: &'a str,
    /// Raw text of commands submitted before this one.
    pub history: &'a [String],
    pub clock: &'a dyn TimeSource,
    pub navigation: &'a NavigationConfig,
}

/// What the interpreter should do after printing a handler's lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Clear,
    Schedule(ScheduledEffect),
    Ask(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub action: Action,
}

impl Outcome {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            action: Action::None,
        }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }

    fn text(text: &str) -> Self {
        Self::lines(text.split('\n').map(str::to_string).collect())
    }
}

pub fn run(builtin: Builtin, inv: &CommandInvocation, ctx: &ShellContext<'_>) -> Outcome {
    match builtin {
        Builtin::Help => Outcome::text(HELP_TEXT),
        Builtin::About => about(ctx),
        Builtin::Experience => experience(ctx),
        Builtin::Projects => projects(ctx),
        Builtin::Skills => Outcome::lines(ctx.profile.skills.all().map(str::to_string).collect()),
        Builtin::Education => Outcome::line(ctx.profile.education.to_string()),
        Builtin::Awards => Outcome::lines(ctx.profile.awards.clone()),
        Builtin::Contact => contact(ctx),
        Builtin::Clear => Outcome {
            lines: Vec::new(),
            action: Action::Clear,
        },
        Builtin::Whoami => Outcome::line(ctx.user),
        Builtin::Pwd => Outcome::line(format!("/home/{}", ctx.user)),
        Builtin::Ls => ls(inv, ctx),
        Builtin::Cat => with_file("cat", inv, ctx, |file| Outcome::text(&file.content)),
        Builtin::Head => with_file("head", inv, ctx, |file| {
            Outcome::text(&file.head(PREVIEW_LINES))
        }),
        Builtin::Tail => with_file("tail", inv, ctx, |file| {
            Outcome::text(&file.tail(PREVIEW_LINES))
        }),
        Builtin::Wc => with_file("wc", inv, ctx, |file| {
            Outcome::line(file.word_count().render(file.name))
        }),
        Builtin::Grep => grep(inv, ctx),
        Builtin::Find => find(inv, ctx),
        Builtin::Date => Outcome::line(
            ctx.clock
                .wall_clock()
                .format("%a %b %e %H:%M:%S %Y")
                .to_string(),
        ),
        Builtin::Uname => {
            if inv.has_flag("-a") {
                Outcome::line(format!("{} {}", OS_NAME, OS_RELEASE))
            } else {
                Outcome::line(OS_NAME)
            }
        }
        Builtin::History => Outcome::lines(
            ctx.history
                .iter()
                .enumerate()
                .map(|(index, command)| format!("{:>4}  {}", index + 1, command))
                .collect(),
        ),
        Builtin::Echo => Outcome::line(inv.argument.clone()),
        Builtin::Tree => tree(ctx),
        Builtin::Ask => ask(inv, ctx),
        Builtin::Portfolio => Outcome {
            lines: vec!["Switching to portfolio view...".to_string()],
            action: Action::Schedule(ScheduledEffect {
                after: ctx.navigation.portfolio_delay(),
                effect: Effect::Navigate(ctx.navigation.portfolio_route.clone()),
            }),
        },
        Builtin::Exit => Outcome {
            lines: vec![
                "logout".to_string(),
                "Thanks for visiting. Resetting session...".to_string(),
            ],
            action: Action::Schedule(ScheduledEffect {
                after: ctx.navigation.reset_delay(),
                effect: Effect::Reset,
            }),
        },
    }
}

fn about(ctx: &ShellContext<'_>) -> Outcome {
    let profile = ctx.profile;
    Outcome::lines(vec![
        profile.name.clone(),
        profile.location.clone(),
        profile.summary.clone(),
    ])
}

fn experience(ctx: &ShellContext<'_>) -> Outcome {
    let mut lines = Vec::new();
    for (index, job) in ctx.profile.experience.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.push(job.company.clone());
        lines.push(job.role.clone());
        lines.push(job.period.clone());
        lines.extend(job.highlights.iter().map(|h| format!("  • {}", h)));
    }
    Outcome::lines(lines)
}

fn projects(ctx: &ShellContext<'_>) -> Outcome {
    let mut lines = Vec::new();
    for (index, project) in ctx.profile.projects.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.push(format!("{} ({})", project.title, project.category));
        lines.push(project.description.clone());
        if !project.technologies.is_empty() {
            lines.push(format!("  Tech: {}", project.technologies.join(", ")));
        }
        if !project.impact.is_empty() {
            lines.push(format!("  Impact: {}", project.impact));
        }
    }
    Outcome::lines(lines)
}

fn contact(ctx: &ShellContext<'_>) -> Outcome {
    let mut lines = vec![format!("Email: {}", ctx.profile.email)];
    lines.extend(
        ctx.profile
            .links
            .labelled()
            .into_iter()
            .map(|(label, url)| format!("{}: {}", label, url)),
    );
    Outcome::lines(lines)
}

fn ls(inv: &CommandInvocation, ctx: &ShellContext<'_>) -> Outcome {
    let long = ["-l", "-la", "-al"].iter().any(|flag| inv.has_flag(flag));
    if long {
        Outcome::lines(ctx.files.long_listing(ctx.user))
    } else {
        Outcome::line(ctx.files.names().collect::<Vec<_>>().join("  "))
    }
}

/// Resolve the file operand shared by `cat`, `head`, `tail` and `wc`.
fn with_file(
    command: &str,
    inv: &CommandInvocation,
    ctx: &ShellContext<'_>,
    render: impl FnOnce(&VirtualFile) -> Outcome,
) -> Outcome {
    let Some(name) = inv.first_arg() else {
        return Outcome::line(format!("{}: missing file operand", command));
    };
    match ctx.files.get(name) {
        Some(file) => render(file),
        None => Outcome::line(format!("{}: {}: No such file or directory", command, name)),
    }
}

fn grep(inv: &CommandInvocation, ctx: &ShellContext<'_>) -> Outcome {
    if inv.argument.is_empty() {
        return Outcome::line("grep: missing search term");
    }
    let matches = ctx.files.grep(&inv.argument);
    if matches.is_empty() {
        return Outcome::line(format!("grep: no matches found for '{}'", inv.argument));
    }
    Outcome::lines(matches.iter().map(ToString::to_string).collect())
}

fn find(inv: &CommandInvocation, ctx: &ShellContext<'_>) -> Outcome {
    if inv.argument.is_empty() {
        return Outcome::line("find: missing search term");
    }
    let found = ctx.files.find(&inv.argument);
    if found.is_empty() {
        return Outcome::line(format!("find: no files found matching '{}'", inv.argument));
    }
    Outcome::lines(found.iter().map(|name| format!("./{}", name)).collect())
}

fn tree(ctx: &ShellContext<'_>) -> Outcome {
    let names: Vec<&str> = ctx.files.names().collect();
    let mut lines = vec![".".to_string()];
    for (index, name) in names.iter().enumerate() {
        let branch = if index + 1 == names.len() {
            "└──"
        } else {
            "├──"
        };
        lines.push(format!("{} {}", branch, name));
    }
    Outcome::lines(lines)
}

fn ask(inv: &CommandInvocation, ctx: &ShellContext<'_>) -> Outcome {
    if inv.argument.is_empty() {
        let first_name = ctx
            .profile
            .name
            .split_whitespace()
            .next()
            .unwrap_or("the owner");
        return Outcome::lines(vec![
            "Usage: /ask <question>".to_string(),
            format!("Example: /ask What is {}'s experience with AI?", first_name),
        ]);
    }
    Outcome {
        lines: Vec::new(),
        action: Action::Ask(inv.argument.clone()),
    }
}
