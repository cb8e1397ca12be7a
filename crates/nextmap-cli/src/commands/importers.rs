use std::path::Path;

use nextmap_graph::{DependencyAnalyzer, NativeRuntime, ProjectWalker, build_dependency_map};

use crate::cli::ImportersArgs;
use crate::commands::utils::{resolve_file, resolve_root, write_json};
use crate::config::{ConfigOverrides, NextmapConfig};
use crate::error::Result;
use crate::ui;

pub fn execute(args: ImportersArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime;
    let root = resolve_root(&args.root, &runtime)?;
    let config = NextmapConfig::load(&root, config_path, &ConfigOverrides::default())?;
    let file = resolve_file(&args.file, &runtime)?;
    let analyzer_config = config.analyzer_config();

    let spinner = ui::Spinner::new("Scanning project imports");
    let walker = ProjectWalker::new(&root, analyzer_config.walker, &runtime)?;
    let tree = walker.walk();
    let analyzer = DependencyAnalyzer::new(walker.root(), &runtime)
        .with_alias_prefix(analyzer_config.alias_prefix);
    let map = build_dependency_map(&tree, &analyzer);
    spinner.finish(&format!("Scanned {} source files", map.len()));

    if map.get(&file).is_none() {
        ui::warning(&format!(
            "{} is not one of the project's source files",
            file.display()
        ));
    }
    let importers = map.importers_of(&file);
    ui::print_importers(&file, importers);

    if let Some(path) = &args.json {
        write_json(path, &importers)?;
    }
    Ok(())
}
