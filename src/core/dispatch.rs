//! Command dispatch
//!
//! Turns an [`OperandSet`] into the ordered list of actions a line asks for.
//! Dispatch only plans; running the plan is the session's job. A line that
//! fails an arity check yields an error and no plan at all.

use std::fmt;
use thiserror::Error;

use super::operands::OperandSet;
use super::operator::Operator;
use super::token::Token;

/// Remote used when a push names only a branch
pub const DEFAULT_REMOTE: &str = "origin";

/// Errors that reject a whole line before anything runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No recognised operator in '{0}'")]
    NoOperator(String),

    #[error("Nothing to do for '{0}'")]
    NoOperands(String),

    #[error("'{operator}' takes {expected} operand(s), got {actual}")]
    Arity {
        operator: Operator,
        expected: &'static str,
        actual: usize,
    },
}

/// Git subcommands the dispatcher can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitSubcommand {
    Add,
    Reset,
    Diff,
    Push,
    Merge,
    Checkout,
    Submodule,
}

impl GitSubcommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            GitSubcommand::Add => "add",
            GitSubcommand::Reset => "reset",
            GitSubcommand::Diff => "diff",
            GitSubcommand::Push => "push",
            GitSubcommand::Merge => "merge",
            GitSubcommand::Checkout => "checkout",
            GitSubcommand::Submodule => "submodule",
        }
    }
}

impl fmt::Display for GitSubcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `git <subcommand> <args...>` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInvocation {
    pub subcommand: GitSubcommand,
    pub args: Vec<String>,
    /// Working directory override, `None` runs in the current directory
    pub cwd: Option<std::path::PathBuf>,
}

impl GitInvocation {
    pub fn new<I, S>(subcommand: GitSubcommand, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subcommand,
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

impl fmt::Display for GitInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.subcommand)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One step of a dispatched line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Run git
    Git(GitInvocation),
    /// Change the shell's working directory (path not yet home-expanded)
    ChangeDir(String),
    /// Record a submodule in the settings document
    RegisterSubmodule { name: String, path: String },
    /// Record a remote for the current repository in the settings document
    RegisterRemote { name: String, url: String },
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::Git(git) => git.fmt(f),
            Invocation::ChangeDir(path) => write!(f, "cd {}", path),
            Invocation::RegisterSubmodule { name, path } => {
                write!(f, "submodule {} = {}", name, path)
            }
            Invocation::RegisterRemote { name, url } => write!(f, "remote {} = {}", name, url),
        }
    }
}

/// Plan the invocations for a partitioned line, in dispatch order.
///
/// Push and merge take one or two operands, cd exactly one and set exactly
/// two; anything else rejects the whole line.
pub fn dispatch(operands: &OperandSet) -> Result<Vec<Invocation>, DispatchError> {
    let mut plan = Vec::new();

    for (operator, tokens) in operands.iter() {
        let values: Vec<&str> = tokens.iter().map(Token::value).collect();
        match (operator, values.as_slice()) {
            (Operator::Add, paths) => plan.push(git(GitSubcommand::Add, paths)),
            (Operator::Reset, paths) => plan.push(git(GitSubcommand::Reset, paths)),
            (Operator::Diff, paths) => plan.push(git(GitSubcommand::Diff, paths)),
            (Operator::Push, [branch]) => {
                plan.push(git(GitSubcommand::Push, &[DEFAULT_REMOTE, *branch]))
            }
            (Operator::Push, [branch, remote]) => {
                plan.push(git(GitSubcommand::Push, &[*remote, *branch]))
            }
            (Operator::Merge, [branch]) => plan.push(git(GitSubcommand::Merge, &[*branch])),
            (Operator::Merge, [target, source]) => {
                plan.push(git(GitSubcommand::Checkout, &[*target]));
                plan.push(git(GitSubcommand::Merge, &[*source]));
            }
            (Operator::Push | Operator::Merge, _) => {
                return Err(arity(operator, "1 or 2", values.len()))
            }
            (Operator::Cd, [path]) => plan.push(Invocation::ChangeDir(path.to_string())),
            (Operator::Cd, _) => return Err(arity(operator, "exactly 1", values.len())),
            (Operator::Set, [name, target]) => {
                let (name, target) = (name.to_string(), target.to_string());
                if tokens[0].is_branch_ref() {
                    plan.push(Invocation::RegisterSubmodule { name, path: target });
                } else {
                    plan.push(Invocation::RegisterRemote { name, url: target });
                }
            }
            (Operator::Set, _) => return Err(arity(operator, "exactly 2", values.len())),
        }
    }

    Ok(plan)
}

fn git(subcommand: GitSubcommand, args: &[&str]) -> Invocation {
    Invocation::Git(GitInvocation::new(subcommand, args.iter().copied()))
}

fn arity(operator: Operator, expected: &'static str, actual: usize) -> DispatchError {
    DispatchError::Arity {
        operator,
        expected,
        actual,
    }
}
