//! Logging setup for the CLI.
//!
//! Library crates only emit `tracing` events; this module installs the one
//! subscriber, with verbosity picked from the global flags:
//!
//! 1. `--verbose`: debug for every nextmap crate
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`, if set
//! 4. info for nextmap crates otherwise

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "nextmap_graph=debug,nextmap_layout=debug,nextmap_schema=debug,nextmap_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "nextmap_graph=info,nextmap_layout=info,nextmap_schema=info,nextmap_cli=info";

/// Filter for the given flags. `verbose` wins over `quiet`.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before any logging.
///
/// Output goes to stderr so JSON written to stdout stays clean.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second call (tests, doc examples) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

/// Whether colored output should be used, from `NO_COLOR`, `FORCE_COLOR`
/// and terminal detection.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
