//! Interactive loop

use tracing::debug;

use crate::cli::console::{LineEditor, PROMPT};
use crate::cli::output::Output;
use crate::cli::session::{run_line, LineReport, ShellContext, ShellError};

/// Print the outcome of a line the way the prompt shows it.
///
/// Returns `true` when the line went through without any error.
pub fn report(outcome: &Result<LineReport, ShellError>) -> bool {
    match outcome {
        Ok(report) => {
            report.print_skipped();
            report.is_clean()
        }
        Err(err) => {
            Output::error(&err.to_string());
            if err.is_parse() {
                Output::info("Press enter on an empty line to see the G syntax");
            }
            false
        }
    }
}

/// Prompt for lines until the editor gives up (Ctrl-C, end of input).
///
/// Every line is handled independently; no error ends the loop.
pub fn run_interactive(ctx: &mut ShellContext, editor: &mut dyn LineEditor) {
    loop {
        let line = match editor.read_line(PROMPT) {
            Ok(line) => line,
            Err(e) => {
                debug!(reason = %e, "prompt closed");
                println!();
                return;
            }
        };

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            editor.record_history(trimmed);
        }
        report(&run_line(ctx, &line));
    }
}
