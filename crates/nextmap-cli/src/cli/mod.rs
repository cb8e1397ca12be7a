//! Command-line interface definition for nextmap.
//!
//! # Command Structure
//!
//! - `nextmap analyze` - walk a project and report routes and insights
//! - `nextmap deps` - dependencies of a single file
//! - `nextmap importers` - files importing a single file
//! - `nextmap layout` - positioned tree nodes for the project explorer
//! - `nextmap schema` - Prisma schema graph with force layout
//! - `nextmap read` - source of a file inside the project root

mod commands;
mod validation;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{
    AnalyzeArgs, Command, DepsArgs, ImportersArgs, LayoutArgs, ReadArgs, SchemaArgs,
};
pub use validation::{Viewport, parse_viewport};

/// nextmap - static analysis for Next.js projects
#[derive(Parser, Debug)]
#[command(
    name = "nextmap",
    version,
    about = "Static analysis for Next.js projects",
    long_about = "nextmap walks a Next.js project, classifies App Router folders and files,\n\
                  maps import dependencies in both directions, and lays out the project\n\
                  tree and Prisma schemas for visual exploration."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to nextmap.config.toml or .json in the project root)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}
