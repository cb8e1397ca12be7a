use std::path::Path;

use nextmap_graph::{DependencyAnalyzer, NativeRuntime};

use crate::cli::DepsArgs;
use crate::commands::utils::{resolve_file, resolve_root, write_json};
use crate::config::{ConfigOverrides, NextmapConfig};
use crate::error::Result;
use crate::ui;

pub fn execute(args: DepsArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime;
    let root = resolve_root(&args.root, &runtime)?;
    let config = NextmapConfig::load(&root, config_path, &ConfigOverrides::default())?;
    let file = resolve_file(&args.file, &runtime)?;

    if !DependencyAnalyzer::is_analyzable(&file) {
        ui::warning(&format!(
            "{} is not a JavaScript or TypeScript source file",
            file.display()
        ));
    }

    let analyzer =
        DependencyAnalyzer::new(&root, &runtime).with_alias_prefix(config.alias_prefix.clone());
    let deps = analyzer.analyze(&file);

    ui::print_dependencies(&file, &deps);
    ui::info(&format!(
        "{} local, {} external",
        deps.local_dependencies.len(),
        deps.external_dependencies.len()
    ));

    if let Some(path) = &args.json {
        write_json(path, &deps)?;
    }
    Ok(())
}
