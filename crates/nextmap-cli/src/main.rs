//! nextmap CLI entry point: argument parsing, logging setup and command
//! dispatch.

use clap::Parser;
use miette::Result;
use nextmap_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let config_path = args.config.as_deref();
    let result = match args.command {
        cli::Command::Analyze(a) => commands::analyze_execute(a, config_path),
        cli::Command::Deps(a) => commands::deps_execute(a, config_path),
        cli::Command::Importers(a) => commands::importers_execute(a, config_path),
        cli::Command::Layout(a) => commands::layout_execute(a, config_path),
        cli::Command::Schema(a) => commands::schema_execute(a, config_path),
        cli::Command::Read(a) => commands::read_execute(a, config_path),
    };

    result.map_err(error::cli_error_to_miette)
}
