use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;
use nextmap_graph::{ContentReader, NativeRuntime};

use crate::cli::ReadArgs;
use crate::commands::utils::{resolve_path, resolve_root};
use crate::config::{ConfigOverrides, NextmapConfig};
use crate::error::Result;

/// Print a file's source to stdout. Relative paths are taken from the root.
pub fn execute(args: ReadArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime;
    let root = resolve_root(&args.root, &runtime)?;
    let config = NextmapConfig::load(&root, config_path, &ConfigOverrides::default())?;

    let reader = ContentReader::new(&root, &runtime).with_max_size(config.max_file_size);
    let content = reader.read(&resolve_path(&args.file, &root))?;
    tracing::debug!("Read {} bytes from {}", content.content.len(), content.file_path.display());

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(content.content.as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}
