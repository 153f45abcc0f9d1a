//! Line input for the interactive shell
//!
//! The shell only needs two things from a line editor: read a line and
//! remember one. [`Console`] does that with a `dialoguer` prompt and
//! arrow-key history; [`PlainConsole`] reads newline-separated input from
//! any reader, which is what the shell uses when stdin is not a terminal.

use colored::Colorize;
use dialoguer::theme::Theme;
use dialoguer::{History, Input};
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, IsTerminal};

/// Prompt shown by the interactive shell
pub const PROMPT: &str = "G";

/// Source of input lines for the shell
pub trait LineEditor {
    /// Block until a line is entered. An error (interrupt, end of input)
    /// ends the session.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Remember an accepted line
    fn record_history(&mut self, line: &str);
}

/// Bounded in-memory history, newest entry first
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: VecDeque<String>,
    max_len: usize,
}

impl SessionHistory {
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_len,
        }
    }

    pub fn push(&mut self, line: &str) {
        if self.max_len == 0 || self.entries.front().is_some_and(|last| last == line) {
            return;
        }
        self.entries.push_front(line.to_string());
        self.entries.truncate(self.max_len);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry `pos` steps back, 0 being the most recent
    pub fn get(&self, pos: usize) -> Option<&str> {
        self.entries.get(pos).map(String::as_str)
    }
}

impl<T> History<T> for SessionHistory {
    fn read(&self, pos: usize) -> Option<String> {
        self.get(pos).map(str::to_string)
    }

    // Lines are recorded through `LineEditor::record_history` once accepted.
    fn write(&mut self, _val: &T) {}
}

/// Renders the prompt as `G > `
struct PromptTheme;

impl Theme for PromptTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{} {} ", prompt, ">".red())
    }
}

/// Terminal prompt backed by `dialoguer`
pub struct Console {
    history: SessionHistory,
}

impl Console {
    pub fn new(history_length: usize) -> Self {
        Self {
            history: SessionHistory::new(history_length),
        }
    }
}

impl LineEditor for Console {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::with_theme(&PromptTheme)
            .with_prompt(prompt)
            .allow_empty(true)
            .report(false)
            .history_with(&mut self.history)
            .interact_text()
            .map_err(io::Error::other)
    }

    fn record_history(&mut self, line: &str) {
        self.history.push(line);
    }
}

/// Line-per-line reader for piped input
pub struct PlainConsole<R> {
    reader: R,
    history: SessionHistory,
}

impl<R: BufRead> PlainConsole<R> {
    pub fn new(reader: R, history_length: usize) -> Self {
        Self {
            reader,
            history: SessionHistory::new(history_length),
        }
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }
}

impl<R: BufRead> LineEditor for PlainConsole<R> {
    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn record_history(&mut self, line: &str) {
        self.history.push(line);
    }
}

/// Pick the line editor for this process
pub fn for_stdin(history_length: usize) -> Box<dyn LineEditor> {
    if io::stdin().is_terminal() {
        Box::new(Console::new(history_length))
    } else {
        Box::new(PlainConsole::new(io::stdin().lock(), history_length))
    }
}
