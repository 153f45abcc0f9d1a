//! CLI layer
//!
//! The interactive prompt, single-line execution and the built-in
//! commands.

pub mod commands;
pub mod console;
pub mod output;
pub mod repl;
pub mod session;

pub use console::{LineEditor, PROMPT};
pub use output::Output;
pub use session::{run_line, LineReport, ShellContext, ShellError};
