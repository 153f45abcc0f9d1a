//! Line execution
//!
//! [`run_line`] takes one input line through classification, partitioning
//! and dispatch, then runs the resulting plan in order. Errors stay scoped
//! to the line: the caller decides whether to keep prompting or exit.

use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::cli::commands::{remotes, submodules, usage};
use crate::cli::output::Output;
use crate::core::dispatch::{dispatch, DispatchError, GitInvocation, Invocation};
use crate::core::operands::partition;
use crate::core::operator::resolve;
use crate::core::settings::{Registration, Settings, SettingsError, SettingsStore};
use crate::core::token::{tokenize, Token};
use crate::git::{CommandRunner, GitError};
use crate::util::paths::expand_home;

/// Errors raised while handling one line
#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Parse(#[from] DispatchError),

    #[error("Git needs to be installed to use G (no '{0}' on PATH)")]
    ToolMissing(String),

    #[error(transparent)]
    Git(GitError),

    #[error("Invalid operand '{operand}': {reason}")]
    InvalidOperand { operand: String, reason: String },

    #[error(transparent)]
    Storage(#[from] SettingsError),
}

impl From<GitError> for ShellError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::NotInstalled(program) => ShellError::ToolMissing(program),
            GitError::MissingDir(dir) => {
                ShellError::invalid(&dir.display().to_string(), "not a directory")
            }
            other => ShellError::Git(other),
        }
    }
}

impl ShellError {
    /// The line itself was malformed, as opposed to something failing
    /// while it ran
    pub fn is_parse(&self) -> bool {
        matches!(self, ShellError::Parse(_))
    }

    /// Only this invocation failed; the rest of the line can still run
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ShellError::InvalidOperand { .. } | ShellError::Storage(_)
        )
    }

    fn invalid(operand: &str, reason: impl Into<String>) -> Self {
        ShellError::InvalidOperand {
            operand: operand.to_string(),
            reason: reason.into(),
        }
    }
}

/// What happened to a line that was not rejected outright
#[derive(Debug, Default)]
pub struct LineReport {
    /// Invocations that completed
    pub executed: usize,
    /// Invocations skipped because of a bad operand or storage failure
    pub skipped: Vec<ShellError>,
}

impl LineReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Print a warning for every skipped invocation
    pub fn print_skipped(&self) {
        for err in &self.skipped {
            Output::warning(&err.to_string());
        }
    }
}

/// Collaborators a line runs against
pub struct ShellContext {
    pub runner: Box<dyn CommandRunner>,
    pub store: Box<dyn SettingsStore>,
}

impl ShellContext {
    pub fn new(runner: Box<dyn CommandRunner>, store: Box<dyn SettingsStore>) -> Self {
        Self { runner, store }
    }
}

/// Word commands recognised before partitioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin<'a> {
    ShowRemotes,
    ShowSubmodules,
    UpdateSubmodules,
    IgnoreSubmodule(&'a str),
    FindSubmodules(Option<&'a str>),
}

impl<'a> Builtin<'a> {
    fn parse(tokens: &'a [Token]) -> Option<Self> {
        let texts: Vec<&'a str> = tokens.iter().map(Token::text).collect();
        match texts.as_slice() {
            ["@remotes"] => Some(Builtin::ShowRemotes),
            ["@submodules"] => Some(Builtin::ShowSubmodules),
            ["update"] => Some(Builtin::UpdateSubmodules),
            ["ignore", path] => Some(Builtin::IgnoreSubmodule(*path)),
            ["find"] => Some(Builtin::FindSubmodules(None)),
            ["find", dir] => Some(Builtin::FindSubmodules(Some(*dir))),
            _ => None,
        }
    }
}

/// Handle one input line.
///
/// An empty line prints the usage screen. A line that cannot be dispatched
/// is rejected before anything runs. A failing git call stops the rest of
/// the line; bad `cd`/`=` operands are collected in the report instead.
pub fn run_line(ctx: &mut ShellContext, line: &str) -> Result<LineReport, ShellError> {
    let tokens = tokenize(line);

    if tokens.is_empty() {
        usage::run_usage();
        return Ok(LineReport::default());
    }
    if let Some(builtin) = Builtin::parse(&tokens) {
        return run_builtin(ctx, builtin);
    }

    let operands = partition(&tokens);
    if operands.is_empty() {
        let line = line.trim().to_string();
        return Err(match resolve(&tokens) {
            Some(_) => DispatchError::NoOperands(line),
            None => DispatchError::NoOperator(line),
        }
        .into());
    }

    let plan = dispatch(&operands)?;
    debug!(steps = plan.len(), "dispatched line");
    execute(ctx, &plan)
}

fn run_builtin(ctx: &mut ShellContext, builtin: Builtin) -> Result<LineReport, ShellError> {
    let settings = ctx.store.load()?;
    match builtin {
        Builtin::ShowRemotes => {
            let cwd = current_dir()?;
            remotes::run_show_remotes(&settings, &cwd);
            Ok(LineReport::default())
        }
        Builtin::ShowSubmodules => {
            submodules::run_show_submodules(&settings);
            Ok(LineReport::default())
        }
        Builtin::UpdateSubmodules => {
            let plan = submodules::update_plan(&settings);
            if plan.is_empty() {
                Output::warning("No submodules registered yet (use `@name = path`)");
            }
            execute(ctx, &plan)
        }
        Builtin::IgnoreSubmodule(path) => {
            ignore_submodule(ctx, settings, path)?;
            Ok(LineReport {
                executed: 1,
                ..LineReport::default()
            })
        }
        Builtin::FindSubmodules(dir) => {
            let added = find_submodules(ctx, settings, dir.unwrap_or("."))?;
            Ok(LineReport {
                executed: added,
                ..LineReport::default()
            })
        }
    }
}

fn ignore_submodule(
    ctx: &mut ShellContext,
    mut settings: Settings,
    path: &str,
) -> Result<(), ShellError> {
    let expanded = expand_home(path);
    let target = std::fs::canonicalize(&expanded)
        .or_else(|_| current_dir().map(|cwd| cwd.join(&expanded)))?;

    match settings.ignore_submodule(&target) {
        Registration::Added => {
            ctx.store.save(&settings)?;
            Output::success(&format!(
                "Ignoring submodule path {}",
                Output::path(&target.display().to_string())
            ));
        }
        _ => Output::warning(&format!("{} is already ignored", target.display())),
    }
    Ok(())
}

fn find_submodules(
    ctx: &mut ShellContext,
    mut settings: Settings,
    dir: &str,
) -> Result<usize, ShellError> {
    let root = resolve_dir(dir)?;
    let added = submodules::discover(&mut settings, &root)
        .map_err(|e| ShellError::invalid(dir, e.to_string()))?;

    if added.is_empty() {
        Output::info(&format!("No new submodules under {}", root.display()));
        return Ok(0);
    }
    ctx.store.save(&settings)?;
    for path in &added {
        Output::success(&format!(
            "Registered submodule {}",
            Output::path(&path.display().to_string())
        ));
    }
    Ok(added.len())
}

/// Run a dispatched plan in order
pub fn execute(ctx: &mut ShellContext, plan: &[Invocation]) -> Result<LineReport, ShellError> {
    let mut report = LineReport::default();

    for invocation in plan {
        let outcome = match invocation {
            Invocation::Git(git) => match run_git(ctx, git) {
                Err(err) if !err.is_skippable() => return Err(err),
                outcome => outcome,
            },
            Invocation::ChangeDir(path) => change_dir(path),
            Invocation::RegisterSubmodule { name, path } => register_submodule(ctx, name, path),
            Invocation::RegisterRemote { name, url } => register_remote(ctx, name, url),
        };

        match outcome {
            Ok(()) => report.executed += 1,
            Err(err) => {
                debug!(step = %invocation, error = %err, "skipping invocation");
                report.skipped.push(err);
            }
        }
    }

    Ok(report)
}

fn run_git(ctx: &mut ShellContext, git: &GitInvocation) -> Result<(), ShellError> {
    match git.cwd {
        Some(ref dir) => Output::command(&format!("{} (in {})", git, dir.display())),
        None => Output::command(&git.to_string()),
    }
    ctx.runner.run(git)?;
    Ok(())
}

fn change_dir(path: &str) -> Result<(), ShellError> {
    let target = expand_home(path);
    if !target.is_dir() {
        return Err(ShellError::invalid(path, "not a directory"));
    }
    std::env::set_current_dir(&target).map_err(|e| ShellError::invalid(path, e.to_string()))?;
    debug!(dir = %target.display(), "changed directory");
    Ok(())
}

fn register_submodule(ctx: &mut ShellContext, name: &str, path: &str) -> Result<(), ShellError> {
    let target = resolve_dir(path)?;
    let mut settings = ctx.store.load()?;

    match settings.add_submodule(name, &target) {
        Registration::Added => {
            ctx.store.save(&settings)?;
            Output::success(&format!(
                "Registered submodule {} at {}",
                Output::branch_name(name),
                Output::path(&target.display().to_string())
            ));
            Ok(())
        }
        Registration::AlreadyPresent => {
            Output::warning(&format!(
                "Submodule {} ({}) is already registered",
                name,
                target.display()
            ));
            Ok(())
        }
        Registration::Ignored => Err(ShellError::invalid(path, "listed under ignore-submodules")),
    }
}

fn register_remote(ctx: &mut ShellContext, name: &str, url: &str) -> Result<(), ShellError> {
    let cwd = current_dir()?;
    let mut settings = ctx.store.load()?;

    match settings.add_remote(&cwd, name, url) {
        Registration::Added => {
            ctx.store.save(&settings)?;
            Output::success(&format!(
                "Registered remote {} for {}",
                Output::branch_name(name),
                Output::path(&cwd.display().to_string())
            ));
        }
        _ => Output::warning(&format!(
            "Remote {} is already registered for {}",
            name,
            cwd.display()
        )),
    }
    Ok(())
}

/// Home-expand, absolutize and check that `path` is an existing directory
fn resolve_dir(path: &str) -> Result<PathBuf, ShellError> {
    let expanded = expand_home(path);
    let canonical = std::fs::canonicalize(&expanded)
        .map_err(|e| ShellError::invalid(path, e.to_string()))?;
    if !canonical.is_dir() {
        return Err(ShellError::invalid(path, "not a directory"));
    }
    Ok(canonical)
}

fn current_dir() -> Result<PathBuf, ShellError> {
    std::env::current_dir().map_err(|e| ShellError::invalid(".", e.to_string()))
}
