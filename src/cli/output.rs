//! CLI output formatting
//!
//! Colored status lines and a small table printer.

use colored::Colorize;

/// Output helper for consistent CLI formatting
pub struct Output;

impl Output {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message.yellow());
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!("{}", message.bold());
    }

    /// Print a list item
    pub fn list_item(item: &str) {
        println!("  - {}", item);
    }

    /// Print a key-value pair
    pub fn kv(key: &str, value: &str) {
        println!("  - {}: {}", key, value);
    }

    /// Echo a command about to run
    pub fn command(command: &str) {
        println!("{} {}", "→".dimmed(), command.dimmed());
    }

    /// Format a branch name consistently
    pub fn branch_name(name: &str) -> String {
        name.magenta().to_string()
    }

    /// Format a path consistently
    pub fn path(path: &str) -> String {
        path.cyan().to_string()
    }
}

/// Table builder for formatted output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with headers
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| h.chars().count()).collect();
        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Vec<&str>) {
        let row: Vec<String> = row.into_iter().map(|s| s.to_string()).collect();
        for (i, cell) in row.iter().enumerate() {
            if i < self.column_widths.len() {
                self.column_widths[i] = self.column_widths[i].max(cell.chars().count());
            }
        }
        self.rows.push(row);
    }

    /// Render the table as plain text, one line per row
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.format_row(&self.headers));
        lines.push(
            self.column_widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            lines.push(self.format_row(row));
        }
        lines
    }

    /// Print the table with a bold header and dimmed separator
    pub fn print(&self) {
        for (i, line) in self.render().into_iter().enumerate() {
            match i {
                0 => println!("{}", line.bold()),
                1 => println!("{}", line.dimmed()),
                _ => println!("{}", line),
            }
        }
    }

    fn format_row(&self, row: &[String]) -> String {
        row.iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = self.column_widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = width)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}
