//! Status lines on stderr.

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Info,
    Warning,
}

/// Marker plus message, colored for the given status.
fn status_line(status: Status, message: &str) -> String {
    match status {
        Status::Success => format!("{} {message}", "✓".green().bold()),
        Status::Info => format!("{} {message}", "ℹ".blue().bold()),
        // Warnings tint the whole line so they stand out between spinner output.
        Status::Warning => format!("{} {}", "⚠".yellow().bold(), message.yellow()),
    }
}

/// A file was written or a step finished.
pub fn success(message: &str) {
    eprintln!("{}", status_line(Status::Success, message));
}

pub fn info(message: &str) {
    eprintln!("{}", status_line(Status::Info, message));
}

/// Non-fatal problem, e.g. no `app/` directory or an unknown file argument.
pub fn warning(message: &str) {
    eprintln!("{}", status_line(Status::Warning, message));
}
