//! Shared CLI output helpers for consistent operator-facing text.

use owo_colors::OwoColorize;
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<14} {value}");
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("{} {message}", "⚠".yellow());
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("{} {message}", "✗".red());
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{message}");
}

/// Percent EV colored by sign.
#[must_use]
pub fn ev_cell(text: &str, positive: bool) -> String {
    if positive {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}
