use std::path::Path;
use std::time::Instant;

use nextmap_graph::{NativeRuntime, analyze_project};

use crate::cli::AnalyzeArgs;
use crate::commands::utils::{resolve_root, write_json};
use crate::config::{ConfigOverrides, NextmapConfig};
use crate::error::Result;
use crate::ui;

pub fn execute(args: AnalyzeArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime;
    let root = resolve_root(&args.root, &runtime)?;

    let overrides = ConfigOverrides {
        app_dir: args.app_dir.clone(),
        analyze_dependencies: args.deps.then_some(true),
        ..ConfigOverrides::default()
    };
    let config = NextmapConfig::load(&root, config_path, &overrides)?;

    let spinner = ui::Spinner::new(&format!("Analyzing {}", root.display()));
    let started = Instant::now();
    let analysis = analyze_project(&root, &config.analyzer_config(), &runtime)?;
    spinner.finish(&format!(
        "Analyzed {} entries in {}",
        analysis.structure.descendants().len(),
        ui::format_duration(started.elapsed())
    ));

    if !analysis.insights.app_router_detected {
        ui::warning(&format!(
            "No App Router found at {}/ (set appDir or --app-dir)",
            config.app_dir
        ));
    }
    ui::print_project_summary(&analysis);

    if let Some(path) = &args.json {
        write_json(path, &analysis)?;
    }
    Ok(())
}
