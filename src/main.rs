//! G command-line entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use gshell::cli::console::{self, PROMPT};
use gshell::cli::output::Output;
use gshell::cli::repl;
use gshell::cli::session::{run_line, ShellContext};
use gshell::core::settings::{Settings, SettingsStore, YamlSettingsStore};
use gshell::git::{CommandRunner, GitCli};
use gshell::telemetry::{init_telemetry, TelemetryConfig};
use gshell::util::signal;

#[derive(Parser)]
#[command(name = "g")]
#[command(author, version, about = "A tiny symbolic shell for git", long_about = None)]
struct Cli {
    /// Run a single line (or read one from the prompt) and let errors
    /// propagate
    #[arg(short, long)]
    debug: bool,

    /// Log every git call
    #[arg(short, long)]
    verbose: bool,

    /// Settings file (default: ~/.config/G/config.yml)
    #[arg(long, env = "G_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Line to run, e.g. "+ a.txt" or "@feature > @master"
    #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    line: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "g", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let _telemetry = init_telemetry(&TelemetryConfig::for_flags(cli.verbose, cli.debug))?;

    let store = match cli.config {
        Some(path) => YamlSettingsStore::new(path),
        None => YamlSettingsStore::default_location()?,
    };
    let history_length = load_history_length(&store);

    let runner = GitCli::new();
    let git_available = runner.is_available();
    let activity = runner.activity().clone();
    let mut ctx = ShellContext::new(Box::new(runner), Box::new(store));

    let line = (!cli.line.is_empty()).then(|| cli.line.join(" "));

    if cli.debug {
        let line = match line {
            Some(line) => line,
            None => console::for_stdin(history_length)
                .read_line(PROMPT)
                .context("No line entered")?,
        };
        let report = run_line(&mut ctx, &line)?;
        if let Some(err) = report.skipped.into_iter().next() {
            return Err(err.into());
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(line) = line {
        let ok = repl::report(&run_line(&mut ctx, &line));
        return Ok(if ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if !git_available {
        Output::warning("Git needs to be installed to use G");
    }

    if let Err(e) = signal::install_interrupt_handler(activity) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    let mut editor = console::for_stdin(history_length);
    repl::run_interactive(&mut ctx, editor.as_mut());
    Ok(ExitCode::SUCCESS)
}

fn load_history_length(store: &YamlSettingsStore) -> usize {
    match store.load() {
        Ok(settings) => settings.history_length,
        Err(e) => {
            Output::warning(&e.to_string());
            Settings::default().history_length
        }
    }
}
