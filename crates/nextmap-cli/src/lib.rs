//! nextmap CLI - static analysis of Next.js projects from the terminal.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - `nextmap.config.{toml,json}` plus `NEXTMAP_*` environment
//!   loading via figment
//! - [`commands`] - one module per subcommand
//! - [`error`] - error types with actionable hints
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages, spinners and tables on stderr
//!
//! # Example
//!
//! ```rust
//! use nextmap_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, true, true);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use config::NextmapConfig;
pub use error::{CliError, ConfigError, Result, ResultExt};
