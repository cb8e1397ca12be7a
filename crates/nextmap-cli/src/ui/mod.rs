//! Terminal output: status messages, spinners and summary tables.
//!
//! Everything here writes to stderr so that `--json -` output on stdout
//! can be piped.
//!
//! ```no_run
//! use nextmap_cli::ui;
//!
//! ui::init_colors(false);
//! let spinner = ui::Spinner::new("Walking project...");
//! spinner.finish("Found 12 routes");
//! ui::warning("No app/ directory found");
//! ```

mod format;
mod messages;
mod spinner;

pub use format::{
    format_duration, format_size, print_dependencies, print_importers, print_project_summary,
    print_schema_summary,
};
pub use messages::{info, success, warning};
pub use spinner::Spinner;

use crate::logger::should_use_colors;

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|key| std::env::var_os(key).is_some())
}

/// Whether spinners should animate: interactive stderr outside CI.
pub fn is_interactive() -> bool {
    !is_ci() && console::user_attended_stderr()
}

/// Set color output for the process from `--no-color` and the environment.
pub fn init_colors(no_color: bool) {
    owo_colors::set_override(!no_color && should_use_colors());
}
