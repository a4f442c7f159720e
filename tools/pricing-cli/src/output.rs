//! Console output for the CLI.
//!
//! Human-readable lines are suppressed in JSON mode so stdout carries only
//! the JSON document. Errors are the exception: they are still reported on
//! stderr, as a JSON object.

use std::fmt::Display;

use console::style;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    fn stdout(&self, line: impl Display) {
        if !self.json {
            println!("{}", line);
        }
    }

    fn stderr(&self, line: impl Display) {
        if !self.json {
            eprintln!("{}", line);
        }
    }

    pub fn info(&self, msg: &str) {
        self.stdout(format_args!("{} {}", style("ℹ").blue(), msg));
    }

    pub fn success(&self, msg: &str) {
        self.stdout(format_args!("{} {}", style("✓").green(), msg));
    }

    pub fn warn(&self, msg: &str) {
        self.stderr(format_args!("{} {}", style("⚠").yellow(), msg));
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.stderr(format_args!("{} {}", style("→").dim(), style(msg).dim()));
        }
    }

    pub fn header(&self, msg: &str) {
        self.stdout(format_args!("\n{}", style(msg).bold().underlined()));
    }

    pub fn kv(&self, key: &str, value: &str) {
        self.stdout(format_args!("  {}: {}", style(key).dim(), value));
    }

    pub fn list_item(&self, item: &str) {
        self.stdout(format_args!("  {} {}", style("•").dim(), item));
    }

    /// Print columns padded to `widths`.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        self.stdout(format_args!("  {}", pad_columns(cols, widths)));
    }

    /// Pretty-printed JSON on stdout, in either mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }
}

fn pad_columns(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths)
        .map(|(col, width)| format!("{:width$}", col, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Status badge for promotion states.
pub fn status_badge(active: bool) -> String {
    let label = if active { style("active").green() } else { style("inactive").dim() };
    label.to_string()
}
