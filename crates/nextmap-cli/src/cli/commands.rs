use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::validation::{Viewport, parse_viewport};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk a project and summarize its routes
    ///
    /// Classifies every folder and file under the App Router root, counts
    /// routes and API endpoints, and detects Prisma schemas.
    Analyze(AnalyzeArgs),

    /// Show the dependencies of one file
    Deps(DepsArgs),

    /// List the project files that import one file
    ///
    /// Analyzes every source file first, so this scans the whole project.
    Importers(ImportersArgs),

    /// Compute the project tree layout
    Layout(LayoutArgs),

    /// Lay out a Prisma schema and print its statistics
    Schema(SchemaArgs),

    /// Print the source of a file inside the project
    Read(ReadArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Project root
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Also build the forward and reverse dependency map
    #[arg(long)]
    pub deps: bool,

    /// Write the full analysis as JSON ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// App Router root segment
    #[arg(long, value_name = "SEG")]
    pub app_dir: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DepsArgs {
    /// Source file to analyze
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Project root used for alias resolution
    #[arg(long, value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Write the records as JSON ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ImportersArgs {
    /// File whose importers to list
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Project root
    #[arg(long, value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Write the importers as JSON ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Project root
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Expand a folder node by id (repeatable)
    #[arg(long = "expand", value_name = "ID")]
    pub expand: Vec<String>,

    /// Expand every folder
    #[arg(long, conflicts_with = "expand")]
    pub expand_all: bool,

    /// Add dependency nodes for every visible file
    #[arg(long)]
    pub with_deps: bool,

    /// Write nodes and edges as JSON ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Prisma schema file
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, value_name = "WxH", value_parser = parse_viewport)]
    pub viewport: Option<Viewport>,

    /// Simulation tick budget
    #[arg(long, value_name = "N")]
    pub ticks: Option<usize>,

    /// Write the positioned graph and statistics as JSON ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ReadArgs {
    /// File to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Project root the file must stay inside
    #[arg(long, value_name = "ROOT")]
    pub root: PathBuf,
}
