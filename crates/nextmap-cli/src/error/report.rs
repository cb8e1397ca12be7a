//! Conversion of CLI errors into miette reports for `main`.

use miette::Report;

use crate::error::CliError;

pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Schema { path, source } => match source {
            nextmap_schema::Error::Syntax { line, message } => miette::miette!(
                help = "Check the block around this line",
                "Invalid schema {} (line {}): {}",
                path.display(),
                line,
                message
            ),
            other => miette::miette!("Invalid schema {}: {}", path.display(), other),
        },
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        other => miette::miette!("{}", other),
    }
}
